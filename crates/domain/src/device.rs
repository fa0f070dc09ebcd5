//! Device model builder.
//!
//! Each entity kind has an explicit `from_spec` constructor that validates
//! its raw shape bottom-up and returns either the typed value or a
//! [`ValidationError`] naming the offending path. The built graph owns its
//! children and is navigated strictly downward; there are no parent
//! back-references, so the tree is cycle-free.

use crate::access::Access;
use crate::error::ValidationError;
use crate::schema::{
    BindingSpec, CommandSpec, DeviceSpec, FieldSpec, ParameterSpec, RegisterSpec,
};
use crate::slug::Slug;
use crate::value::ValueSpec;

/// A field's declared coordinate in the cross-device index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Domain the field contributes to.
    pub domain: Slug,
    /// Dimension within the domain.
    pub dimension: Slug,
    /// Entity within the domain, or the domain-only sentinel.
    pub entity: Slug,
}

impl From<BindingSpec> for Binding {
    fn from(spec: BindingSpec) -> Self {
        Self {
            domain: Slug::new(spec.domain),
            dimension: Slug::new(spec.dimension),
            entity: Slug::new(spec.entity),
        }
    }
}

/// A bit-range within a register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    /// Offset of the lowest bit within the register, `>= 0`.
    pub bit_offset: u64,
    /// Width in bits, `>= 1`.
    pub bit_length: u64,
    pub access: Access,
    /// Declared index coordinate, if any.
    pub binding: Option<Binding>,
    pub values: ValueSpec,
}

impl Field {
    fn from_spec(spec: FieldSpec, path: &str) -> Result<Self, ValidationError> {
        let bit_offset = int_at_least(&format!("{path}.bit_offset"), spec.bit_offset, 0)?;
        let bit_length = int_at_least(&format!("{path}.bit_length"), spec.bit_length, 1)?;
        let access = parse_access(&spec.access, path)?;
        let values = ValueSpec::from_spec(
            spec.values.unwrap_or_default(),
            &format!("{path}.values"),
        )?;
        Ok(Self {
            name: spec.name,
            bit_offset,
            bit_length,
            access,
            binding: spec.binding.map(Binding::from),
            values,
        })
    }

    /// Width of the field in bits.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.bit_length
    }

    /// Whether this field can be read, derived from its access mode.
    #[must_use]
    pub fn can_read(&self) -> bool {
        self.access.can_read()
    }

    /// Whether this field can be written, derived from its access mode.
    #[must_use]
    pub fn can_write(&self) -> bool {
        self.access.can_write()
    }
}

/// An addressable storage unit of a device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Register {
    pub name: String,
    pub address: i64,
    /// Size in addressable units, `>= 1`.
    pub size: u64,
    pub description: String,
    pub fields: Vec<Field>,
}

impl Register {
    fn from_spec(spec: RegisterSpec, path: &str) -> Result<Self, ValidationError> {
        let size = int_at_least(&format!("{path}.size"), spec.size, 1)?;
        let fields = spec
            .fields
            .into_iter()
            .enumerate()
            .map(|(index, field)| Field::from_spec(field, &format!("{path}.fields[{index}]")))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: spec.name,
            address: spec.address,
            size,
            description: spec.description,
            fields,
        })
    }
}

/// An argument of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub description: String,
    pub access: Access,
    pub values: ValueSpec,
}

impl Parameter {
    fn from_spec(spec: ParameterSpec, path: &str) -> Result<Self, ValidationError> {
        let access = parse_access(&spec.access, path)?;
        let values = ValueSpec::from_spec(
            spec.values.unwrap_or_default(),
            &format!("{path}.values"),
        )?;
        Ok(Self {
            name: spec.name,
            description: spec.description,
            access,
            values,
        })
    }

    /// Whether this parameter can be read, derived from its access mode.
    #[must_use]
    pub fn can_read(&self) -> bool {
        self.access.can_read()
    }

    /// Whether this parameter can be written, derived from its access mode.
    #[must_use]
    pub fn can_write(&self) -> bool {
        self.access.can_write()
    }
}

/// An invokable action of a device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub command_code: i64,
    pub description: String,
    pub parameters: Vec<Parameter>,
}

impl Command {
    fn from_spec(spec: CommandSpec, path: &str) -> Result<Self, ValidationError> {
        let parameters = spec
            .parameters
            .into_iter()
            .enumerate()
            .map(|(index, parameter)| {
                Parameter::from_spec(parameter, &format!("{path}.parameters[{index}]"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: spec.name,
            command_code: spec.command_code,
            description: spec.description,
            parameters,
        })
    }
}

/// One hardware component's register and command map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub name: String,
    pub description: String,
    pub registers: Vec<Register>,
    pub commands: Vec<Command>,
}

impl Device {
    /// Build a fully linked device graph from its raw description.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] identifying the offending field path
    /// when any numeric value is out of range or an access token is
    /// unrecognized; construction of the device aborts entirely.
    pub fn from_spec(spec: DeviceSpec) -> Result<Self, ValidationError> {
        let registers = spec
            .registers
            .into_iter()
            .enumerate()
            .map(|(index, register)| {
                Register::from_spec(register, &format!("registers[{index}]"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let commands = spec
            .commands
            .into_iter()
            .enumerate()
            .map(|(index, command)| Command::from_spec(command, &format!("commands[{index}]")))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: spec.name,
            description: spec.description,
            registers,
            commands,
        })
    }
}

fn parse_access(token: &str, path: &str) -> Result<Access, ValidationError> {
    Access::from_token(token).ok_or_else(|| ValidationError::UnknownAccessToken {
        path: format!("{path}.access"),
        token: token.to_string(),
    })
}

fn int_at_least(path: &str, value: i64, min: i64) -> Result<u64, ValidationError> {
    let out_of_range = || ValidationError::IntegerOutOfRange {
        path: path.to_string(),
        min,
        value,
    };
    if value < min {
        return Err(out_of_range());
    }
    u64::try_from(value).map_err(|_| out_of_range())
}
