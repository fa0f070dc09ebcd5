//! Raw declarative-file shapes.
//!
//! These structs mirror the YAML grammar one-to-one and carry no invariants;
//! the typed constructors in [`device`](crate::device) and
//! [`library`](crate::library) turn them into the validated model. Unknown
//! keys are rejected, matching the strictness of the declarative grammar.
//!
//! Generator `options` stay an opaque [`serde_yaml::Value`] here: only the
//! engine selected by the registry knows how to validate them.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Top-level wrapper of a library description file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibraryDoc {
    /// The single library the file defines.
    pub library: LibrarySpec,
}

/// Raw shape of a library description.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibrarySpec {
    pub name: String,
    pub description: String,
    pub slug: String,
    pub devices: Vec<DeviceEntry>,
    pub generators: Vec<GeneratorSpec>,
}

/// One device declaration inside a library: a slug plus its definition.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceEntry {
    pub slug: String,
    pub definition: DeviceSpec,
}

/// Top-level wrapper of a standalone device description file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceDoc {
    /// The single device the file defines.
    pub device: DeviceSpec,
}

/// Raw shape of one device.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceSpec {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub registers: Vec<RegisterSpec>,
    #[serde(default)]
    pub commands: Vec<CommandSpec>,
}

/// Raw shape of one register.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterSpec {
    pub name: String,
    pub address: i64,
    pub size: i64,
    pub description: String,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

/// Raw shape of one bit-field.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    pub name: String,
    pub bit_offset: i64,
    pub bit_length: i64,
    pub access: String,
    #[serde(default)]
    pub binding: Option<BindingSpec>,
    #[serde(default)]
    pub values: Option<ValuesSpec>,
}

/// Raw shape of a binding declaration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BindingSpec {
    pub domain: String,
    pub dimension: String,
    pub entity: String,
}

/// Raw shape of a value descriptor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValuesSpec {
    #[serde(default)]
    pub range: Option<RangeSpec>,
    #[serde(default, rename = "enum")]
    pub enumeration: Option<BTreeMap<String, i64>>,
    #[serde(default)]
    pub boolean: Option<BTreeMap<bool, i64>>,
}

/// Raw shape of a numeric range.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangeSpec {
    pub offset: i64,
    pub step: i64,
    pub unit: String,
}

/// Raw shape of one command.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandSpec {
    pub name: String,
    pub command_code: i64,
    pub description: String,
    #[serde(default)]
    pub parameters: Vec<ParameterSpec>,
}

/// Raw shape of one command parameter.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterSpec {
    pub name: String,
    pub description: String,
    pub access: String,
    #[serde(default)]
    pub values: Option<ValuesSpec>,
}

/// Raw shape of a generator declaration: engine id plus engine-specific options.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorSpec {
    pub engine: String,
    pub options: serde_yaml::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_minimal_device_doc() {
        let yaml = "
device:
  name: AXP192
  description: Power management IC
";
        let doc: DeviceDoc = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(doc.device.name, "AXP192");
        assert!(doc.device.registers.is_empty());
        assert!(doc.device.commands.is_empty());
    }

    #[test]
    fn should_parse_field_with_binding_and_values() {
        let yaml = "
name: VOLTAGE
bit_offset: 0
bit_length: 7
access: rw
binding:
  domain: pwr
  dimension: voltage
  entity: dcdc1
values:
  range:
    offset: 700
    step: 25
    unit: mV
";
        let field: FieldSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(field.bit_length, 7);
        assert_eq!(field.binding.as_ref().unwrap().dimension, "voltage");
        assert_eq!(field.values.unwrap().range.unwrap().unit, "mV");
    }

    #[test]
    fn should_reject_unknown_keys() {
        let yaml = "
name: VOLTAGE
bit_offset: 0
bit_length: 7
access: rw
extra_key: nope
";
        assert!(serde_yaml::from_str::<FieldSpec>(yaml).is_err());
    }

    #[test]
    fn should_parse_boolean_values_with_bool_keys() {
        let yaml = "
boolean:
  true: 1
  false: 0
";
        let values: ValuesSpec = serde_yaml::from_str(yaml).unwrap();
        let boolean = values.boolean.unwrap();
        assert_eq!(boolean.get(&true), Some(&1));
        assert_eq!(boolean.get(&false), Some(&0));
    }

    #[test]
    fn should_keep_generator_options_opaque() {
        let yaml = "
engine: datasheet_md
options:
  output: ./datasheet.md
";
        let spec: GeneratorSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(spec.engine, "datasheet_md");
        assert!(spec.options.get("output").is_some());
    }
}
