use indoc::indoc;

use crate::{Configuration, Error, Extensions, GrammarKey, Language};

#[test]
fn defaults() {
    let config = Configuration::default();
    assert!(config.error_recovery_enabled);
    assert!(config.c_file_extensions.is_empty());
    assert_eq!(config.extensions, Extensions::default());
    assert!(config.extensions.gnu && config.extensions.managed && config.extensions.attributed_atl);
}

#[test]
fn language_by_suffix() {
    let config = Configuration::default()
        .with_c_file_extension(".c")
        .with_c_file_extension(".h");

    assert_eq!(config.language_for("src/main.c"), Language::C);
    assert_eq!(config.language_for("include/util.h"), Language::C);
    assert_eq!(config.language_for("src/main.cc"), Language::Cxx);
    assert_eq!(config.language_for("src/main.cpp"), Language::Cxx);
}

#[test]
fn suffix_match_is_case_sensitive() {
    let config = Configuration::default().with_c_file_extension(".c");
    assert_eq!(config.language_for("legacy.C"), Language::Cxx);
}

#[test]
fn no_suffixes_means_cxx() {
    assert_eq!(Configuration::default().language_for("a.c"), Language::Cxx);
}

#[test]
fn grammar_key_for_c_drops_managed_and_atl() {
    let config = Configuration::default().with_error_recovery(false);

    let cxx = config.grammar_key(Language::Cxx);
    assert_eq!(
        cxx,
        GrammarKey {
            error_recovery: false,
            language: Language::Cxx,
            extensions: Extensions::default(),
        }
    );

    let c = config.grammar_key(Language::C);
    assert_eq!(
        c.extensions,
        Extensions {
            gnu: true,
            managed: false,
            attributed_atl: false,
        }
    );
}

#[test]
fn from_json() {
    let config = Configuration::from_json(indoc! {r#"
        {
          "errorRecoveryEnabled": false,
          "cFileExtensions": [".c"],
          "extensions": { "managed": false }
        }
    "#})
    .unwrap();

    assert!(!config.error_recovery_enabled);
    assert_eq!(config.language_for("x.c"), Language::C);
    assert!(config.extensions.gnu);
    assert!(!config.extensions.managed);
    assert!(config.extensions.attributed_atl);
}

#[test]
fn from_json_empty_object_is_default() {
    assert_eq!(
        Configuration::from_json("{}").unwrap(),
        Configuration::default()
    );
}

#[test]
fn from_json_rejects_bad_types() {
    let err = Configuration::from_json(r#"{ "errorRecoveryEnabled": "yes" }"#).unwrap_err();
    let Error::Config(source) = &err else {
        panic!("expected a config error, got {err:?}");
    };
    assert_eq!(source.classify(), serde_json::error::Category::Data);
    assert_eq!(source.line(), 1);
    assert!(err.to_string().starts_with("invalid configuration: invalid type"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn from_json_reports_syntax_position() {
    let err = Configuration::from_json("{\n  \"extensions\": {\n}").unwrap_err();
    let Error::Config(source) = &err else {
        panic!("expected a config error, got {err:?}");
    };
    assert!(source.is_eof());
    assert_eq!(source.line(), 3);
}

#[test]
fn json_roundtrip_uses_camel_case() {
    let config = Configuration::default().with_c_file_extension(".c");
    let json = serde_json::to_value(&config).unwrap();

    assert_eq!(json["errorRecoveryEnabled"], true);
    assert_eq!(json["cFileExtensions"][0], ".c");
    assert_eq!(json["extensions"]["attributedAtl"], true);
}
