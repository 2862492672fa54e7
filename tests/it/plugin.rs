//! A second value kind, declared outside the crate.

use std::{any::Any, fmt};

use flagval::{BoxError, Destination, FlagBase, TypedValue, Value, ValueCreator};

#[derive(Debug, Default, Clone)]
pub struct TextConfig {
    pub max_len: Option<usize>,
}

pub type TextFlag = FlagBase<String, TextConfig, TextValue>;

pub struct TextValue {
    text: Destination<String>,
    has_been_set: bool,
    max_len: Option<usize>,
}

impl ValueCreator<String, TextConfig> for TextValue {
    fn create(default: String, mut destination: Destination<String>, config: &TextConfig) -> Self {
        destination.put(default);
        TextValue { text: destination, has_been_set: false, max_len: config.max_len }
    }

    fn display(value: &String) -> String {
        value.clone()
    }
}

impl Value for TextValue {
    fn set(&mut self, raw: &str) -> Result<(), BoxError> {
        if let Some(max) = self.max_len {
            if raw.len() > max {
                return Err(format!("longer than {max} bytes").into());
            }
        }
        self.text.put(raw.to_string());
        self.has_been_set = true;
        Ok(())
    }

    fn is_set(&self) -> bool {
        self.has_been_set
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl TypedValue for TextValue {
    type Output = String;

    const KIND: &'static str = "text";

    fn get(&self) -> String {
        self.text.get()
    }
}

impl fmt::Debug for TextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.text.get())
    }
}

#[test]
fn custom_kind_round_trips_through_lookup() {
    let mut cmd = flagval::Command::new("greet")
        .add_flag(TextFlag::new("name").config(TextConfig { max_len: Some(5) }))
        .unwrap();
    cmd.parse(["--name", "ferris"]).unwrap_err();
    assert_eq!(cmd.value::<TextValue>("name"), Some(String::new()));

    cmd.parse(["--name", "crab"]).unwrap();
    assert_eq!(cmd.value::<TextValue>("name"), Some("crab".to_string()));
}
