//! Macros for reducing boilerplate when defining form sections

/// Implement [`FormValues`](crate::core::field::FormValues) for a struct of
/// `String` fields
///
/// Each Rust field is mapped to the key used by controls, rule sets and the
/// JSON shape. The macro also adds a `FIELDS` constant listing the keys in
/// declaration order.
///
/// # Example
/// ```rust
/// use onboard::impl_form_values;
///
/// #[derive(Debug, Clone, Default)]
/// struct Contact {
///     full_name: String,
///     email: String,
/// }
///
/// impl_form_values!(Contact {
///     full_name => "fullName",
///     email => "email",
/// });
///
/// use onboard::core::field::FormValues;
/// let mut c = Contact::default();
/// assert!(c.set_field("fullName", "Ana".to_string()));
/// assert!(!c.set_field("age", "3".to_string()));
/// assert_eq!(c.field("fullName"), Some("Ana"));
/// assert_eq!(Contact::FIELDS, &["fullName", "email"]);
/// ```
#[macro_export]
macro_rules! impl_form_values {
    ($type:ident { $($field:ident => $key:literal),* $(,)? }) => {
        impl $crate::core::field::FormValues for $type {
            fn field(&self, name: &str) -> Option<&str> {
                match name {
                    $($key => Some(self.$field.as_str()),)*
                    _ => None,
                }
            }

            fn set_field(&mut self, name: &str, value: String) -> bool {
                match name {
                    $($key => {
                        self.$field = value;
                        true
                    })*
                    _ => false,
                }
            }
        }

        impl $type {
            /// Field keys in declaration order
            #[allow(dead_code)]
            pub const FIELDS: &'static [&'static str] = &[$($key),*];
        }
    };
}
