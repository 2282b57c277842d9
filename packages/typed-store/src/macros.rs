//! The `preferences!` declaration macro.

/// Declare a struct of typed preference fields.
///
/// Each field is written `name: Type`, optionally followed by `=> "key"`
/// to store it under a key other than its name, and `= default`. Only
/// `Option<String>` fields may leave out the default; they read as `None`
/// until set.
///
/// The generated struct is generic over its store and gets:
/// - `new(store)` and `open(env, namespace)`, which declare every field
/// - one method per field returning an [`Entry`](crate::Entry)
/// - `clear()`, `preferences()`, `preferences_mut()` and `into_inner()`
///
/// Those names cannot be used as field names.
///
/// # Example
///
/// ```rust
/// use typedprefs::preferences;
/// use typedprefs_json_store::InMemoryStore;
///
/// preferences! {
///     pub struct Settings {
///         /// Interface color scheme.
///         theme: Option<String> = Some("light".to_string()),
///         launches: i64 => "launch_count" = 0,
///         volume: f32 = 0.8,
///     }
/// }
///
/// # fn main() -> Result<(), typedprefs::Error> {
/// let mut settings = Settings::new(InMemoryStore::new())?;
/// settings.launches().update(|n| n + 1)?;
/// assert_eq!(settings.theme().get()?.as_deref(), Some("light"));
/// assert_eq!(settings.launches().get()?, 1);
/// # Ok(())
/// # }
/// ```
///
/// A field of a type that is not a [`Preference`](crate::Preference), or a
/// non-optional field without a default, does not compile:
///
/// ```compile_fail
/// typedprefs::preferences! {
///     struct Broken {
///         ratio: f64 = 0.5,
///     }
/// }
/// ```
///
/// ```compile_fail
/// typedprefs::preferences! {
///     struct Broken {
///         clicks: i32,
///     }
/// }
/// ```
#[macro_export]
macro_rules! preferences {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $ty:ty $(=> $key:literal)? $(= $default:expr)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name<S> {
            preferences: $crate::Preferences<S>,
            $($field: $crate::Field<$ty>,)*
        }

        impl<S: $crate::Store> $name<S> {
            /// Declare every field on top of `store`.
            pub fn new(store: S) -> ::std::result::Result<Self, $crate::Error> {
                Self::from_preferences($crate::Preferences::new(store))
            }

            /// Open the store of `namespace` in `env` and declare every field.
            pub fn open<E>(env: &E, namespace: &str) -> ::std::result::Result<Self, $crate::Error>
            where
                E: $crate::Environment<Store = S> + ?Sized,
            {
                Self::from_preferences($crate::Preferences::open(env, namespace)?)
            }

            fn from_preferences(
                mut preferences: $crate::Preferences<S>,
            ) -> ::std::result::Result<Self, $crate::Error> {
                $(
                    let $field = preferences.declare::<$ty>(
                        ::std::stringify!($field),
                        $crate::__preference_key!($($key)?),
                        $crate::__preference_default!($ty $(, $default)?),
                    )?;
                )*
                ::std::result::Result::Ok(Self {
                    preferences,
                    $($field,)*
                })
            }

            $(
                $(#[$field_meta])*
                pub fn $field(&mut self) -> $crate::Entry<'_, S, $ty> {
                    self.preferences.entry(&self.$field)
                }
            )*

            /// Remove everything stored in this namespace.
            pub fn clear(&mut self) -> ::std::result::Result<(), $crate::Error> {
                self.preferences.clear()
            }

            pub fn preferences(&self) -> &$crate::Preferences<S> {
                &self.preferences
            }

            pub fn preferences_mut(&mut self) -> &mut $crate::Preferences<S> {
                &mut self.preferences
            }

            pub fn into_inner(self) -> S {
                self.preferences.into_inner()
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __preference_key {
    () => {
        ::std::option::Option::None
    };
    ($key:literal) => {
        ::std::option::Option::Some($key)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __preference_default {
    ($ty:ty) => {
        <$ty as $crate::OptionalPreference>::absent()
    };
    ($ty:ty, $default:expr) => {
        $default
    };
}
