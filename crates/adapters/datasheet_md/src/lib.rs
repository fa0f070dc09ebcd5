//! Markdown datasheet generator.
//!
//! The `datasheet_md` engine renders a resolved library into one markdown
//! document: per-device register and command tables plus the derived
//! accessor list. Rendering is pure; only [`Generator::generate`] touches
//! the filesystem, writing the document to the `output` path given in the
//! generator options.

use std::fmt::Write as _;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use regbind_app::ports::Generator;
use regbind_domain::accessor::derive_accessors;
use regbind_domain::device::{Command, Device, Register};
use regbind_domain::error::{GeneratorError, RegbindError};
use regbind_domain::library::Library;
use regbind_domain::value::ValueSpec;

/// Registry identifier of this engine.
pub const ENGINE: &str = "datasheet_md";

/// Options of the `datasheet_md` engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasheetMdOptions {
    /// Path the rendered document is written to.
    pub output: PathBuf,
}

/// The `datasheet_md` generator back-end.
#[derive(Debug)]
pub struct DatasheetMdGenerator {
    options: DatasheetMdOptions,
}

impl DatasheetMdGenerator {
    /// Registry factory: validate `options` and construct the generator.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvalidOptions`] when `options` does not
    /// match the engine's schema (`output: <path>`).
    pub fn factory(options: &serde_yaml::Value) -> Result<Box<dyn Generator>, GeneratorError> {
        let options: DatasheetMdOptions = serde_yaml::from_value(options.clone())
            .map_err(|err| GeneratorError::InvalidOptions {
                engine: ENGINE,
                source: Box::new(err),
            })?;
        Ok(Box::new(Self { options }))
    }
}

impl Generator for DatasheetMdGenerator {
    fn engine(&self) -> &'static str {
        ENGINE
    }

    fn generate(&self, library: &Library) -> Result<(), RegbindError> {
        let document = render(library);
        std::fs::write(&self.options.output, document).map_err(|err| {
            GeneratorError::Failed {
                engine: ENGINE,
                source: Box::new(err),
            }
        })?;
        Ok(())
    }
}

/// Render the datasheet for a resolved library.
#[must_use]
pub fn render(library: &Library) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}", library.name);
    let _ = writeln!(out, "\n{}", library.description);

    for (slug, device) in library.devices() {
        let _ = writeln!(out, "\n## {} (`{slug}`)", device.name);
        let _ = writeln!(out, "\n{}", device.description);
        render_registers(&mut out, device);
        render_commands(&mut out, device);
    }

    let accessors = derive_accessors(library);
    if !accessors.is_empty() {
        let _ = writeln!(out, "\n## Accessors\n");
        for accessor in accessors {
            let _ = writeln!(out, "- `{accessor}`");
        }
    }
    out
}

fn render_registers(out: &mut String, device: &Device) {
    if device.registers.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n### Registers\n");
    let _ = writeln!(out, "| Register | Address | Size | Description |");
    let _ = writeln!(out, "|---|---|---|---|");
    for register in &device.registers {
        let _ = writeln!(
            out,
            "| {} | {:#04x} | {} | {} |",
            register.name, register.address, register.size, register.description
        );
    }
    for register in &device.registers {
        render_fields(out, register);
    }
}

fn render_fields(out: &mut String, register: &Register) {
    if register.fields.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n#### {} fields\n", register.name);
    let _ = writeln!(out, "| Field | Bits | Access | Binding | Values |");
    let _ = writeln!(out, "|---|---|---|---|---|");
    for field in &register.fields {
        let msb = field.bit_offset + field.bit_length - 1;
        let binding = field.binding.as_ref().map_or_else(String::new, |b| {
            format!("{}/{}/{}", b.domain, b.dimension, b.entity)
        });
        let _ = writeln!(
            out,
            "| {} | [{msb}:{}] | {} | {binding} | {} |",
            field.name,
            field.bit_offset,
            field.access,
            render_values(&field.values)
        );
    }
}

fn render_commands(out: &mut String, device: &Device) {
    if device.commands.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n### Commands\n");
    let _ = writeln!(out, "| Command | Code | Description | Parameters |");
    let _ = writeln!(out, "|---|---|---|---|");
    for command in &device.commands {
        let _ = writeln!(
            out,
            "| {} | {:#04x} | {} | {} |",
            command.name,
            command.command_code,
            command.description,
            render_parameters(command)
        );
    }
}

fn render_parameters(command: &Command) -> String {
    command
        .parameters
        .iter()
        .map(|parameter| format!("`{}` ({})", parameter.name, parameter.access))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_values(values: &ValueSpec) -> String {
    match values {
        ValueSpec::Any => String::new(),
        ValueSpec::Range(range) => {
            format!("offset {}, step {} {}", range.offset, range.step, range.unit)
        }
        ValueSpec::Enum(map) => map.keys().cloned().collect::<Vec<_>>().join(", "),
        ValueSpec::Boolean(_) => "boolean".to_string(),
    }
}
