#[cfg(test)]
pub mod test {
    use std::collections::HashMap;

    use serde::{Deserialize, Serialize};

    use crate::{FieldDescriptor, Kind, Record, ScalarKind, Slot, impl_record};

    /// The shape used by the end-to-end scenarios: a flag-aliased port and a
    /// comma-separated host list. Document keys are PascalCase.
    #[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
    #[serde(rename_all = "PascalCase", default)]
    pub struct Server {
        pub port: i64,
        pub hosts: Vec<String>,
    }

    impl_record!(Server {
        port(flag = "p"),
        hosts(vsep = ","),
    });

    /// A port that is only reachable through its environment alias.
    #[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
    pub struct Listener {
        pub port: i64,
    }

    impl_record!(Listener { port(env = "PORT") });

    /// Float fields that text binding can leave non-finite.
    #[derive(Serialize, Deserialize, Debug, Default)]
    #[serde(default)]
    pub struct Tuned {
        pub port: i64,
        pub ratio: f64,
        pub weights: Vec<f32>,
        pub ceiling: Option<f64>,
    }

    impl_record!(Tuned {
        port,
        ratio,
        weights,
        ceiling,
    });

    /// One field of every supported kind, plus the kinds that have no rule.
    #[derive(Debug, Default, PartialEq)]
    pub struct Everything {
        pub text: String,
        pub flag: bool,
        pub tiny: i8,
        pub small: i16,
        pub medium: i32,
        pub large: i64,
        pub native: isize,
        pub byte: u8,
        pub word: u16,
        pub dword: u32,
        pub qword: u64,
        pub unative: usize,
        pub single: f32,
        pub double: f64,
        pub words: Vec<String>,
        pub ports: Vec<u16>,
        pub labels: HashMap<String, String>,
        pub inner: Inner,
        pub maybe: Option<i32>,
        pub nested_list: Vec<Vec<String>>,
    }

    impl_record!(Everything {
        text,
        flag(env = "DEBUG", flag = "d"),
        tiny,
        small,
        medium,
        large,
        native(env = "NATIVE"),
        byte,
        word,
        dword,
        qword,
        unative,
        single,
        double,
        words(vsep = ","),
        ports,
        labels,
        inner,
        maybe,
        nested_list,
    });

    #[derive(Debug, Default, PartialEq)]
    pub struct Inner {
        pub value: String,
    }

    impl_record!(Inner { value });

    /// Two fields answering to the same key.
    #[derive(Debug, Default, PartialEq)]
    pub struct Shadowed {
        pub primary: u8,
        pub mirror: u32,
    }

    impl_record!(Shadowed {
        primary(env = "LEVEL"),
        mirror(flag = "LEVEL"),
    });

    /// Hand-written record whose `id` is visible but not writable.
    #[derive(Debug, Default, PartialEq)]
    pub struct Locked {
        pub id: u32,
        pub name: String,
    }

    impl Record for Locked {
        fn fields() -> Vec<FieldDescriptor> {
            vec![
                FieldDescriptor::new("id", Kind::Scalar(ScalarKind::U32)),
                FieldDescriptor::new("name", Kind::Scalar(ScalarKind::Text)),
            ]
        }

        fn slot(&mut self, field: &str) -> Slot<'_> {
            match field {
                "name" => Slot::Scalar(&mut self.name),
                _ => Slot::ReadOnly,
            }
        }
    }

    #[test]
    fn server_document_keys_are_pascal_case() {
        let server: Server = serde_json::from_str(r#"{"Port": 1, "Hosts": ["a"]}"#).unwrap();
        assert_eq!(
            server,
            Server {
                port: 1,
                hosts: vec!["a".into()],
            }
        );
    }
}
