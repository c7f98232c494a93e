//! End-to-end write and restart through the real shell runner

use ifaces_wizard_core::{
    AdapterRecord, AddressSource, ConfigurationWriter, InterfaceName, InterfaceRestart,
    InterfacesFile, RestartCommands, Settings, ShellRunner, StaticParams,
};
use std::fs;

fn settings_with(list: &str) -> Settings {
    Settings {
        list_command: list.to_string(),
        up_command: "echo up {iface}".to_string(),
        down_command: "echo down {iface}".to_string(),
        ..Settings::default()
    }
}

#[test]
fn static_configuration_for_running_interface() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("interfaces");
    fs::write(&path, "auto lo\niface lo inet loopback\n\nauto eth0\niface eth0 inet dhcp\n")
        .unwrap();

    let settings = settings_with("printf 'lo UNKNOWN\\neth0 UP\\n'");
    let runner = ShellRunner::new(settings.shell.clone());
    let writer = ConfigurationWriter::new(InterfaceRestart::new(
        &runner,
        RestartCommands::from_settings(&settings),
    ));

    let eth0 = InterfaceName::new("eth0").unwrap();
    let mut interfaces = InterfacesFile::load(&path).unwrap().with_backup(true);
    let existing = interfaces.existing_record(&eth0);
    let params = StaticParams::new("10.0.0.5", "255.255.255.0", "10.0.0.1");
    let record = AdapterRecord::static_ip(eth0.clone(), params.clone());

    let result = writer
        .apply(&mut interfaces, existing.as_ref(), &record)
        .unwrap();

    assert!(result.success());
    assert_eq!(result.output, "down eth0\nup eth0\n");

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("auto eth0\niface eth0 inet static\n"));
    assert!(written.contains("    address 10.0.0.5\n"));
    assert_eq!(written.matches("iface eth0 ").count(), 1);
    assert!(dir.path().join("interfaces.bak").exists());

    let reloaded = InterfacesFile::load(&path).unwrap();
    let stored = reloaded.existing_record(&eth0).unwrap();
    assert_eq!(stored.source(), AddressSource::Static);
    assert_eq!(stored.static_params(), Some(&params));
}

#[test]
fn dhcp_configuration_for_stopped_interface() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("interfaces");

    let settings = settings_with("printf 'eth1 UP\\n'");
    let runner = ShellRunner::new(settings.shell.clone());
    let writer = ConfigurationWriter::new(InterfaceRestart::new(
        &runner,
        RestartCommands::from_settings(&settings),
    ));

    let eth0 = InterfaceName::new("eth0").unwrap();
    let mut interfaces = InterfacesFile::load(&path).unwrap();
    let result = writer
        .apply(&mut interfaces, None, &AdapterRecord::dhcp(eth0))
        .unwrap();

    assert_eq!(result.output, "up eth0\n");
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "auto eth0\niface eth0 inet dhcp\n"
    );
}

#[test]
fn failing_restart_command_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("interfaces");

    let settings = Settings {
        list_command: "true".to_string(),
        up_command: "echo cannot bring up {iface} >&2; exit 1".to_string(),
        ..Settings::default()
    };
    let runner = ShellRunner::new(settings.shell.clone());
    let writer = ConfigurationWriter::new(InterfaceRestart::new(
        &runner,
        RestartCommands::from_settings(&settings),
    ));

    let mut interfaces = InterfacesFile::load(&path).unwrap();
    let result = writer
        .apply(
            &mut interfaces,
            None,
            &AdapterRecord::dhcp(InterfaceName::new("eth0").unwrap()),
        )
        .unwrap();

    assert_eq!(result.exit_code, 1);
    assert_eq!(result.output, "cannot bring up eth0\n");
}
