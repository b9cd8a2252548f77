//! Reserved words.
//!
//! Only words the tokenizer reports as `TokenKind::Keyword` live here.
//! Contextual words (`ref`, `each`, `sealed`, ...) are plain identifiers and the
//! grammar matches them by text.

use std::fmt;

use serde::Serialize;

macro_rules! keywords {
    (@c c) => { true };
    (@c) => { false };
    ($($variant:ident => $text:literal $(, $c:ident)?;)*) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(into = "&'static str")]
        pub enum Keyword {
            $($variant,)*
        }

        impl Keyword {
            pub const ALL: &'static [Keyword] = &[$(Keyword::$variant,)*];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Keyword::$variant => $text,)*
                }
            }

            pub fn from_text(text: &str) -> Option<Keyword> {
                match text {
                    $($text => Some(Keyword::$variant),)*
                    _ => None,
                }
            }

            /// Whether the word is also reserved in C.
            pub fn is_c_keyword(self) -> bool {
                match self {
                    $(Keyword::$variant => keywords!(@c $($c)?),)*
                }
            }
        }
    };
}

keywords! {
    Alignas => "alignas";
    Alignof => "alignof";
    Asm => "asm";
    Auto => "auto", c;
    Bool => "bool";
    Break => "break", c;
    Case => "case", c;
    Catch => "catch";
    Char => "char", c;
    Char16T => "char16_t";
    Char32T => "char32_t";
    Class => "class";
    Const => "const", c;
    Constexpr => "constexpr";
    ConstCast => "const_cast";
    Continue => "continue", c;
    Decltype => "decltype";
    Default => "default", c;
    Delete => "delete";
    Do => "do", c;
    Double => "double", c;
    DynamicCast => "dynamic_cast";
    Else => "else", c;
    Enum => "enum", c;
    Explicit => "explicit";
    Export => "export";
    Extern => "extern", c;
    False => "false";
    Final => "final";
    Float => "float", c;
    For => "for", c;
    Friend => "friend";
    Gcnew => "gcnew";
    Goto => "goto", c;
    If => "if", c;
    Inline => "inline", c;
    Int => "int", c;
    Long => "long", c;
    Mutable => "mutable";
    Namespace => "namespace";
    New => "new";
    Noexcept => "noexcept";
    Nullptr => "nullptr";
    Operator => "operator";
    Override => "override";
    Private => "private";
    Protected => "protected";
    Public => "public";
    Register => "register", c;
    ReinterpretCast => "reinterpret_cast";
    Return => "return", c;
    Short => "short", c;
    Signed => "signed", c;
    Sizeof => "sizeof", c;
    Static => "static", c;
    StaticAssert => "static_assert";
    StaticCast => "static_cast";
    Struct => "struct", c;
    Switch => "switch", c;
    Template => "template";
    This => "this";
    ThreadLocal => "thread_local";
    Throw => "throw";
    True => "true";
    Try => "try";
    Typedef => "typedef", c;
    Typeid => "typeid";
    Typename => "typename";
    Union => "union", c;
    Unsigned => "unsigned", c;
    Using => "using";
    Virtual => "virtual";
    Void => "void", c;
    Volatile => "volatile", c;
    WcharT => "wchar_t";
    While => "while", c;
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Keyword> for &'static str {
    fn from(keyword: Keyword) -> Self {
        keyword.as_str()
    }
}
