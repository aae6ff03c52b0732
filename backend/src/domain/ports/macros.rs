//! `define_port_error!` builds port error enums with snake_case constructors.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Build a `", stringify!($variant), "` error.")]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = concat!("Build a `", stringify!($variant), "` error.")]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
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
                $variant $( {
                    $(
                        #[doc = concat!("`", stringify!($field), "` reported with the failure.")]
                        $field : $ty
                    ),*
                } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum SamplePortError {
            Connection { message: String } => "store unreachable: {message}",
            Timeout { seconds: u32 } => "store timed out after {seconds}s",
            Rejected { message: String, rows: u32 } => "rejected {rows} rows: {message}",
            Closed => "store closed",
        }
    }

    #[test]
    fn string_fields_accept_str() {
        let err = SamplePortError::connection("refused");
        assert_eq!(err.to_string(), "store unreachable: refused");
    }

    #[test]
    fn numeric_fields_keep_their_type() {
        assert_eq!(SamplePortError::timeout(30_u32).to_string(), "store timed out after 30s");
    }

    #[test]
    fn mixed_fields_and_unit_variants() {
        assert_eq!(
            SamplePortError::rejected("duplicate key", 2_u32).to_string(),
            "rejected 2 rows: duplicate key"
        );
        assert_eq!(SamplePortError::closed(), SamplePortError::Closed);
    }
}
