//! Macros for ergonomic identifier declarations.

/// Generate a fieldless enum together with its `Identifier` implementation.
///
/// Each variant's name is its identifier name.
///
/// # Example
///
/// ```
/// use machina::core::Identifier;
/// use machina::identifier_enum;
///
/// identifier_enum! {
///     pub enum AppState {
///         Available,
///         Registered,
///         Activated,
///     }
/// }
///
/// assert_eq!(AppState::Registered.name(), "Registered");
/// ```
#[macro_export]
macro_rules! identifier_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Identifier for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
