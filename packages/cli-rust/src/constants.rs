//! Shared CLI texts.

pub const BACKGROUND_TITLE: &str = "Network Interface Configuration";

pub const ROOT_REQUIRED: &str = "root privileges required. run with sudo";

pub const WELCOME: &str = "Welcome to ifaces-wizard!\n\n\
This tool helps you to set up your network interface.";
pub const WELCOME_YES: &str = "OK";
pub const WELCOME_NO: &str = "Cancel";

pub const SELECT_INTERFACE: &str = "Select interface";
pub const SELECT_SOURCE: &str = "Select address source";
pub const NO_INTERFACES: &str = "No configurable network interfaces were found.";

pub const CONFIGURING_DHCP: &str = "Configuring for DHCP provided address...";
pub const CONFIGURING_STATIC: &str = "Configuring for static IP address...";
pub const STATIC_FORM_TITLE: &str = "Provide the values for static IP configuration";

pub const CONFIG_SUCCESS: &str = "Network configuration completed successfully!";
pub const CONFIG_ERROR: &str = "Error occurred while configuring network interface!";

/// Width of each static form field; fits a dotted-quad address
pub const FORM_FIELD_LENGTH: usize = 15;
