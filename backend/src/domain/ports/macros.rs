//! `define_port_error!`: port error enums with constructors and log labels.
//!
//! Every variant `FooBar { a: A, .. }` gets a `foo_bar(a: impl Into<A>, ..)`
//! constructor, and the enum gets `kind()`, returning the snake_case variant
//! name for use as a structured log field.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* }) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*

            /// Snake_case variant name, stable across message changes.
            #[must_use]
            pub const fn kind(&self) -> &'static str {
                ::paste::paste! {
                    match self {
                        $( Self::$variant { .. } => stringify!([<$variant:snake>]), )*
                    }
                }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    define_port_error! {
        pub enum LedgerError {
            Closed => "ledger closed",
            Rejected { reason: String } => "entry rejected: {reason}",
            OverLimit { limit: u32 } => "over limit of {limit}",
            PartialWrite { reason: String, written: u32 } => "partial write after {written}: {reason}",
        }
    }

    #[rstest]
    #[case(LedgerError::closed(), "ledger closed", "closed")]
    #[case(LedgerError::rejected("duplicate email"), "entry rejected: duplicate email", "rejected")]
    #[case(LedgerError::over_limit(5_u32), "over limit of 5", "over_limit")]
    #[case(
        LedgerError::partial_write("disk full", 3_u32),
        "partial write after 3: disk full",
        "partial_write"
    )]
    fn constructors_render_and_label(
        #[case] error: LedgerError,
        #[case] message: &str,
        #[case] kind: &str,
    ) {
        assert_eq!(error.to_string(), message);
        assert_eq!(error.kind(), kind);
    }

    #[rstest]
    fn string_fields_accept_owned_and_borrowed() {
        assert_eq!(
            LedgerError::rejected(String::from("x")),
            LedgerError::rejected("x")
        );
    }
}
