//! Macros for ergonomic state machine construction.

/// Generate a state enum with its `State` implementation.
///
/// Each variant is paired with the snake_case label used for display,
/// logging and serialization. The macro also generates `ALL`,
/// `from_name`, `Display`, and string-based serde impls.
///
/// # Example
///
/// ```
/// use chimera::core::State;
/// use chimera::state_enum;
///
/// state_enum! {
///     pub enum DoorState {
///         Closed => "closed",
///         Swinging => "swinging",
///         Broken => "broken",
///     }
///     final: [Broken]
///     transient: [Swinging]
/// }
///
/// assert_eq!(DoorState::Closed.name(), "closed");
/// assert_eq!(DoorState::from_name("broken"), Some(DoorState::Broken));
/// assert_eq!(DoorState::ALL.len(), 3);
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $label:literal
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
        $(transient: [$($transient:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            /// Look a variant up by its label.
            pub fn from_name(label: &str) -> Option<Self> {
                match label {
                    $($label => Some(Self::$variant),)*
                    _ => None,
                }
            }
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => $label),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    _ => false,
                }
            }

            fn is_transient(&self) -> bool {
                match self {
                    $($(Self::$transient => true,)*)?
                    _ => false,
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::State::name(self))
            }
        }

        impl serde::Serialize for $name {
            fn serialize<Ser>(&self, serializer: Ser) -> ::std::result::Result<Ser::Ok, Ser::Error>
            where
                Ser: serde::Serializer,
            {
                serializer.serialize_str($crate::core::State::name(self))
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<De>(deserializer: De) -> ::std::result::Result<Self, De::Error>
            where
                De: serde::Deserializer<'de>,
            {
                let label = <String as serde::Deserialize>::deserialize(deserializer)?;
                Self::from_name(&label).ok_or_else(|| {
                    <De::Error as serde::de::Error>::unknown_variant(&label, &[$($label),*])
                })
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::State;

    state_enum! {
        enum TestState {
            Initial => "initial",
            Redirect => "redirect",
            Complete => "complete",
        }
        final: [Complete]
        transient: [Redirect]
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(TestState::Initial.name(), "initial");
        assert!(!TestState::Initial.is_final());
        assert!(!TestState::Initial.is_transient());

        assert!(TestState::Complete.is_final());
        assert!(TestState::Redirect.is_transient());
    }

    #[test]
    fn state_enum_lists_all_variants() {
        assert_eq!(
            TestState::ALL,
            &[TestState::Initial, TestState::Redirect, TestState::Complete]
        );
    }

    #[test]
    fn state_enum_round_trips_labels() {
        for state in TestState::ALL {
            assert_eq!(TestState::from_name(state.name()), Some(*state));
            assert_eq!(state.to_string(), state.name());
        }
        assert_eq!(TestState::from_name("Initial"), None);
    }

    #[test]
    fn state_enum_serializes_as_label() {
        let json = serde_json::to_string(&TestState::Redirect).unwrap();
        assert_eq!(json, "\"redirect\"");

        let parsed: TestState = serde_json::from_str("\"complete\"").unwrap();
        assert_eq!(parsed, TestState::Complete);

        assert!(serde_json::from_str::<TestState>("\"missing\"").is_err());
    }

    #[test]
    fn state_enum_works_without_final_or_transient() {
        state_enum! {
            enum MinimalState {
                One => "one",
                Two => "two",
            }
        }

        let state = MinimalState::One;
        assert!(!state.is_final());
        assert!(!state.is_transient());
    }
}
