//! Accessor signature deriver.
//!
//! A read-only traversal over a resolved [`Library`] that emits the
//! canonical get/set name grammar. The produced strings are a verbatim
//! contract relied upon by generators and documentation tooling:
//!
//! | scope       | domain   | read                      | write                          |
//! |-------------|----------|---------------------------|--------------------------------|
//! | domain-only | root     | `get_<dim>()`             | `set_<dim>(val)`               |
//! | entity      | root     | `get_<dim>(root::)`       | `set_<dim>(root::, val)`       |
//! | domain-only | non-root | `get_<D>_<dim>()`         | `set_<D>_<dim>(val)`           |
//! | entity      | non-root | `get_<D>_<dim>(<D>::)`    | `set_<D>_<dim>(<D>::, val)`    |
//!
//! Dimensions that never received an action are skipped.

use std::fmt;

use crate::library::{DimensionScope, Library};
use crate::slug::Slug;

/// Direction of an accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorKind {
    /// Read accessor, emitted when any bound field is read-capable.
    Get,
    /// Write accessor, emitted when any bound field is write-capable.
    Set,
}

/// One derived accessor declaration; `Display` renders the grammar above.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessor {
    pub kind: AccessorKind,
    pub domain: Slug,
    pub dimension: Slug,
    /// Whether the domain is the reserved root domain (its slug is then
    /// omitted from the accessor name).
    pub domain_is_root: bool,
    /// Whether the dimension is entity-scoped (adds the `<domain>::`
    /// qualifier argument).
    pub entity_scoped: bool,
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            AccessorKind::Get => f.write_str("get_")?,
            AccessorKind::Set => f.write_str("set_")?,
        }
        if !self.domain_is_root {
            write!(f, "{}_", self.domain)?;
        }
        write!(f, "{}(", self.dimension)?;
        match (self.entity_scoped, self.kind) {
            (false, AccessorKind::Get) => {}
            (false, AccessorKind::Set) => f.write_str("val")?,
            (true, AccessorKind::Get) => write!(f, "{}::", self.domain)?,
            (true, AccessorKind::Set) => write!(f, "{}::, val", self.domain)?,
        }
        f.write_str(")")
    }
}

/// Derive every accessor declaration of a resolved library.
///
/// Domains and dimensions are visited in slug order; for each dimension the
/// read form precedes the write form. Dimensions with undefined scope emit
/// nothing.
#[must_use]
pub fn derive_accessors(library: &Library) -> Vec<Accessor> {
    let mut accessors = Vec::new();
    for domain in library.domains().values() {
        for dimension in domain.dimensions().values() {
            let entity_scoped = match dimension.scope() {
                DimensionScope::Undefined => continue,
                DimensionScope::DomainOnly => false,
                DimensionScope::Entity => true,
            };
            let accessor = |kind| Accessor {
                kind,
                domain: domain.slug().clone(),
                dimension: dimension.slug().clone(),
                domain_is_root: domain.is_root(),
                entity_scoped,
            };
            if dimension.has_read_action() {
                accessors.push(accessor(AccessorKind::Get));
            }
            if dimension.has_write_action() {
                accessors.push(accessor(AccessorKind::Set));
            }
        }
    }
    accessors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::LibraryDoc;

    fn library(devices_yaml: &str) -> Library {
        let yaml = format!(
            "
library:
  name: Test
  description: test library
  slug: test
  generators: []
  devices:
{devices_yaml}"
        );
        let doc: LibraryDoc = serde_yaml::from_str(&yaml).unwrap();
        Library::from_doc(doc).unwrap()
    }

    fn single_field_library(access: &str, domain: &str, dimension: &str, entity: &str) -> Library {
        library(&format!(
            "
    - slug: dev1
      definition:
        name: Dev
        description: d
        registers:
          - name: R0
            address: 0
            size: 1
            description: r
            fields:
              - name: F0
                bit_offset: 0
                bit_length: 1
                access: {access}
                binding:
                  domain: {domain}
                  dimension: {dimension}
                  entity: {entity}
"
        ))
    }

    fn rendered(library: &Library) -> Vec<String> {
        derive_accessors(library)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn should_emit_only_get_for_read_only_root_domain_only_dimension() {
        let lib = single_field_library("r", "root", "temp", "_");
        assert_eq!(rendered(&lib), vec!["get_temp()"]);
    }

    #[test]
    fn should_emit_root_domain_only_pair_for_rw() {
        let lib = single_field_library("rw", "root", "temp", "_");
        assert_eq!(rendered(&lib), vec!["get_temp()", "set_temp(val)"]);
    }

    #[test]
    fn should_emit_root_entity_scoped_pair() {
        let lib = single_field_library("rw", "root", "temp", "cell1");
        assert_eq!(
            rendered(&lib),
            vec!["get_temp(root::)", "set_temp(root::, val)"]
        );
    }

    #[test]
    fn should_emit_non_root_domain_only_pair() {
        let lib = single_field_library("rw", "pwr", "temp", "_");
        assert_eq!(
            rendered(&lib),
            vec!["get_pwr_temp()", "set_pwr_temp(val)"]
        );
    }

    #[test]
    fn should_emit_non_root_entity_scoped_pair() {
        let lib = single_field_library("rw", "pwr", "temp", "dcdc1");
        assert_eq!(
            rendered(&lib),
            vec!["get_pwr_temp(pwr::)", "set_pwr_temp(pwr::, val)"]
        );
    }

    #[test]
    fn should_emit_only_set_for_write_only_dimension() {
        let lib = single_field_library("w", "pwr", "enable", "_");
        assert_eq!(rendered(&lib), vec!["set_pwr_enable(val)"]);
    }

    #[test]
    fn should_aggregate_capabilities_across_devices_before_emitting() {
        // dev1 offers read-only, dev2 write-only: the dimension gets both forms.
        let lib = library(
            "
    - slug: dev1
      definition:
        name: A
        description: a
        registers:
          - name: R0
            address: 0
            size: 1
            description: r
            fields:
              - name: F0
                bit_offset: 0
                bit_length: 1
                access: r
                binding:
                  domain: pwr
                  dimension: voltage
                  entity: dcdc1
    - slug: dev2
      definition:
        name: B
        description: b
        registers:
          - name: R0
            address: 0
            size: 1
            description: r
            fields:
              - name: F0
                bit_offset: 0
                bit_length: 1
                access: w
                binding:
                  domain: pwr
                  dimension: voltage
                  entity: dcdc2
",
        );
        assert_eq!(
            rendered(&lib),
            vec!["get_pwr_voltage(pwr::)", "set_pwr_voltage(pwr::, val)"]
        );
    }

    #[test]
    fn should_order_output_by_domain_then_dimension_slug() {
        let lib = library(
            "
    - slug: dev1
      definition:
        name: A
        description: a
        registers:
          - name: R0
            address: 0
            size: 1
            description: r
            fields:
              - name: F0
                bit_offset: 0
                bit_length: 1
                access: r
                binding:
                  domain: pwr
                  dimension: voltage
                  entity: _
              - name: F1
                bit_offset: 1
                bit_length: 1
                access: r
                binding:
                  domain: adc
                  dimension: current
                  entity: _
              - name: F2
                bit_offset: 2
                bit_length: 1
                access: r
                binding:
                  domain: adc
                  dimension: battery
                  entity: _
",
        );
        assert_eq!(
            rendered(&lib),
            vec!["get_adc_battery()", "get_adc_current()", "get_pwr_voltage()"]
        );
    }
}
