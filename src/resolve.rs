//! Field resolution: which fields of a record does an input key target?
//!
//! Fields are scanned in declaration order and compared against the key by
//! their [effective name](crate::FieldDescriptor::effective_name). The
//! comparison is exact and case-sensitive. A key that matches nothing resolves
//! to an empty list, which the binder treats as "not for us".

use crate::record::Record;
use crate::types::FieldDescriptor;

/// Descriptors of every field of `R` whose effective name equals `key`.
///
/// More than one field can match when a record gives two fields the same
/// alias; all of them are returned, in declaration order.
pub fn resolve<R: Record>(key: &str) -> Vec<FieldDescriptor> {
    R::fields()
        .into_iter()
        .filter(|field| field.effective_name() == key)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{Everything, Shadowed};

    fn names<R: Record>(key: &str) -> Vec<&'static str> {
        resolve::<R>(key).iter().map(|f| f.name).collect()
    }

    #[test]
    fn declared_name_matches() {
        assert_eq!(names::<Everything>("text"), ["text"]);
    }

    #[test]
    fn match_is_case_sensitive() {
        assert!(names::<Everything>("TEXT").is_empty());
        assert!(names::<Everything>("Text").is_empty());
    }

    #[test]
    fn no_partial_match() {
        assert!(names::<Everything>("tex").is_empty());
        assert!(names::<Everything>("texts").is_empty());
    }

    #[test]
    fn flag_alias_hides_declared_name_and_env_alias() {
        // `flag` is declared with env = "DEBUG" and flag = "d".
        assert_eq!(names::<Everything>("d"), ["flag"]);
        assert!(names::<Everything>("DEBUG").is_empty());
        assert!(names::<Everything>("flag").is_empty());
    }

    #[test]
    fn env_alias_hides_declared_name() {
        assert_eq!(names::<Everything>("NATIVE"), ["native"]);
        assert!(names::<Everything>("native").is_empty());
    }

    #[test]
    fn unknown_key_resolves_to_nothing() {
        assert!(names::<Everything>("HOME").is_empty());
    }

    #[test]
    fn duplicate_effective_names_all_match_in_order() {
        assert_eq!(names::<Shadowed>("LEVEL"), ["primary", "mirror"]);
    }
}
