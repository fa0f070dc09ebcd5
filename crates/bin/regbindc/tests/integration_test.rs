//! End-to-end smoke tests for the full regbind pipeline.
//!
//! Each test exercises the same stack the CLI wires together: YAML
//! description → device model builder → binding resolver → accessor
//! deriver → generator dispatch. No process is spawned.

use regbind_adapter_datasheet_md::DatasheetMdGenerator;
use regbind_app::{GenerationService, GeneratorRegistry};
use regbind_domain::accessor::derive_accessors;
use regbind_domain::error::{GeneratorError, RegbindError, ScopeConflictError};
use regbind_domain::library::Library;
use regbind_domain::schema::LibraryDoc;

fn registry() -> GeneratorRegistry {
    let mut registry = GeneratorRegistry::new();
    registry.register(
        regbind_adapter_datasheet_md::ENGINE,
        DatasheetMdGenerator::factory,
    );
    registry
}

fn build(yaml: &str) -> Result<Library, RegbindError> {
    let doc: LibraryDoc = serde_yaml::from_str(yaml).expect("description should be valid YAML");
    Library::from_doc(doc)
}

const POWER_LIBRARY: &str = "
library:
  name: AXP Power Library
  description: Power management components
  slug: axp
  generators: []
  devices:
    - slug: axp192
      definition:
        name: AXP192
        description: PMIC
        registers:
          - name: DCDC1_VOLTAGE
            address: 0x26
            size: 1
            description: DC-DC1 voltage setting
            fields:
              - name: VOLTAGE
                bit_offset: 0
                bit_length: 7
                access: rw
                binding:
                  domain: pwr
                  dimension: voltage
                  entity: dcdc1
              - name: ENABLED
                bit_offset: 7
                bit_length: 1
                access: rw
                binding:
                  domain: pwr
                  dimension: enable
                  entity: dcdc1
          - name: CHIP_TEMP
            address: 0x5E
            size: 2
            description: Internal temperature ADC
            fields:
              - name: TEMP
                bit_offset: 0
                bit_length: 12
                access: r
                binding:
                  domain: root
                  dimension: temperature
                  entity: _
";

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[test]
fn should_derive_accessor_lines_for_a_full_library() {
    let library = build(POWER_LIBRARY).unwrap();
    let lines: Vec<String> = derive_accessors(&library)
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        lines,
        vec![
            "get_pwr_enable(pwr::)",
            "set_pwr_enable(pwr::, val)",
            "get_pwr_voltage(pwr::)",
            "set_pwr_voltage(pwr::, val)",
            "get_temperature()",
        ]
    );
}

#[test]
fn should_keep_devices_queryable_after_resolution() {
    let library = build(POWER_LIBRARY).unwrap();
    let device = library.device("axp192").unwrap();
    assert_eq!(device.registers.len(), 2);
    assert_eq!(device.registers[1].address, 0x5E);
    assert_eq!(device.registers[1].fields[0].bit_length, 12);
}

// ---------------------------------------------------------------------------
// Failure paths
// ---------------------------------------------------------------------------

#[test]
fn should_fail_with_scope_conflict_across_devices() {
    let yaml = "
library:
  name: Conflicting
  description: scope conflict across devices
  slug: conflict
  generators: []
  devices:
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
                  domain: root
                  dimension: temperature
                  entity: _
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
                access: r
                binding:
                  domain: root
                  dimension: temperature
                  entity: cell1
";
    let err = build(yaml).unwrap_err();
    assert!(matches!(
        err,
        RegbindError::ScopeConflict(ScopeConflictError::EntityInDomainOnly { .. })
    ));
}

#[test]
fn should_fail_with_validation_error_carrying_the_field_path() {
    let yaml = "
library:
  name: Broken
  description: bad bit_length
  slug: broken
  generators: []
  devices:
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
                bit_length: 0
                access: r
";
    let err = build(yaml).unwrap_err();
    assert_eq!(
        err.to_string(),
        "registers[0].fields[0].bit_length: must be at least 1, got 0"
    );
}

// ---------------------------------------------------------------------------
// Generator dispatch
// ---------------------------------------------------------------------------

#[test]
fn should_fail_generation_for_unknown_engine() {
    let yaml = "
library:
  name: Lib
  description: unknown generator engine
  slug: lib
  devices: []
  generators:
    - engine: datasheet_html
      options: {}
";
    let library = build(yaml).unwrap();
    let err = GenerationService::new(registry())
        .run(&library)
        .unwrap_err();
    assert!(matches!(
        err,
        RegbindError::Generator(GeneratorError::UnknownEngine(engine)) if engine == "datasheet_html"
    ));
}

#[test]
fn should_run_datasheet_generator_end_to_end() {
    let output = std::env::temp_dir().join(format!("regbind-e2e-{}.md", std::process::id()));
    let yaml = format!(
        "
library:
  name: AXP Power Library
  description: Power management components
  slug: axp
  devices:
    - slug: axp192
      definition:
        name: AXP192
        description: PMIC
        registers:
          - name: CHIP_TEMP
            address: 0x5E
            size: 2
            description: Internal temperature ADC
            fields:
              - name: TEMP
                bit_offset: 0
                bit_length: 12
                access: r
                binding:
                  domain: root
                  dimension: temperature
                  entity: _
  generators:
    - engine: datasheet_md
      options:
        output: {}
",
        output.display()
    );
    let library = build(&yaml).unwrap();
    GenerationService::new(registry()).run(&library).unwrap();

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.contains("# AXP Power Library"));
    assert!(written.contains("- `get_temperature()`"));
    let _ = std::fs::remove_file(&output);
}
