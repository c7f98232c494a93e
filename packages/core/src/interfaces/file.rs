//! Interfaces file persistence
//!
//! Reads and writes the Debian `/etc/network/interfaces` format. The file is
//! kept as an ordered list of blocks: `iface` stanzas and runs of verbatim
//! lines. Only `inet` stanzas are ever replaced; loopback, inet6, `source`,
//! `mapping` and comment lines keep their place and text.

use super::record::{
    AdapterRecord, AddressConfig, AddressSource, FAMILY_INET, InterfaceName, StaticParams,
};
use crate::error::PersistenceError;
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Keywords that mark an interface for automatic bring-up
const AUTO_KEYWORDS: [&str; 2] = ["auto", "allow-auto"];
const HOTPLUG_KEYWORD: &str = "allow-hotplug";
const VERBATIM_KEYWORDS: [&str; 6] = [
    "source",
    "source-directory",
    "source-dir",
    "no-auto-down",
    "no-scripts",
    "rename",
];

/// Mode used for a freshly created interfaces file
const DEFAULT_MODE: u32 = 0o644;

/// One `iface` stanza
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adapter {
    pub name: String,
    pub auto: bool,
    pub hotplug: bool,
    pub family: String,
    pub method: String,
    pub options: Vec<(String, String)>,
    /// Comment lines directly above the stanza
    pub comments: Vec<String>,
    /// Comment lines between options, keyed by the option they precede
    pub inner_comments: Vec<(usize, String)>,
}

impl Adapter {
    pub fn new(
        name: impl Into<String>,
        family: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            auto: false,
            hotplug: false,
            family: family.into(),
            method: method.into(),
            options: Vec::new(),
            comments: Vec::new(),
            inner_comments: Vec::new(),
        }
    }

    /// First value of an option key
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Interpret this stanza as a wizard-managed record
    ///
    /// Returns `None` for anything that is not `inet` dhcp/static, for names
    /// that fail validation, and for static stanzas missing any of address,
    /// netmask or gateway.
    pub fn to_record(&self) -> Option<AdapterRecord> {
        if self.family != FAMILY_INET {
            return None;
        }
        let name = InterfaceName::new(self.name.as_str()).ok()?;
        let config = match AddressSource::from_method(&self.method)? {
            AddressSource::Dhcp => AddressConfig::Dhcp,
            AddressSource::Static => AddressConfig::Static(StaticParams::new(
                self.option("address")?,
                self.option("netmask")?,
                self.option("gateway")?,
            )),
        };

        Some(AdapterRecord {
            name,
            auto: self.auto,
            family: self.family.clone(),
            config,
        })
    }

    fn render(&self, out: &mut String) {
        for comment in &self.comments {
            out.push_str(comment);
            out.push('\n');
        }
        if self.auto {
            out.push_str(&format!("auto {}\n", self.name));
        }
        if self.hotplug {
            out.push_str(&format!("{HOTPLUG_KEYWORD} {}\n", self.name));
        }
        out.push_str(&format!(
            "iface {} {} {}\n",
            self.name, self.family, self.method
        ));
        for (idx, (key, value)) in self.options.iter().enumerate() {
            self.render_inner_comments(idx, out);
            if value.is_empty() {
                out.push_str(&format!("    {key}\n"));
            } else {
                out.push_str(&format!("    {key} {value}\n"));
            }
        }
        self.render_inner_comments(self.options.len(), out);
    }

    fn render_inner_comments(&self, position: usize, out: &mut String) {
        for (_, comment) in self.inner_comments.iter().filter(|(p, _)| *p == position) {
            out.push_str(comment);
            out.push('\n');
        }
    }
}

impl From<&AdapterRecord> for Adapter {
    fn from(record: &AdapterRecord) -> Self {
        let mut adapter = Adapter::new(
            record.name.as_str(),
            record.family.as_str(),
            record.source().as_str(),
        );
        adapter.auto = record.auto;
        if let AddressConfig::Static(params) = &record.config {
            adapter.options = vec![
                ("address".to_string(), params.address.clone()),
                ("netmask".to_string(), params.netmask.clone()),
                ("gateway".to_string(), params.gateway.clone()),
            ];
        }
        adapter
    }
}

#[derive(Debug, Clone)]
enum BlockKind {
    Verbatim(Vec<String>),
    Stanza(Adapter),
}

#[derive(Debug, Clone)]
struct Block {
    /// Preceded by a blank line
    spaced: bool,
    kind: BlockKind,
}

impl Block {
    fn stanza(&self) -> Option<&Adapter> {
        match &self.kind {
            BlockKind::Stanza(adapter) => Some(adapter),
            BlockKind::Verbatim(_) => None,
        }
    }
}

/// Parsed interfaces file
#[derive(Debug, Clone)]
pub struct InterfacesFile {
    path: PathBuf,
    backup: bool,
    blocks: Vec<Block>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Context {
    Top,
    Stanza,
    /// Inside a `mapping` block or a stanza the wizard can't interpret
    Verbatim,
}

/// Line-by-line builder for [`InterfacesFile`]
struct Parser {
    blocks: Vec<Block>,
    /// Comment and `auto` lines not yet assigned to a block
    pending: Vec<String>,
    context: Context,
    spaced: bool,
}

impl Parser {
    fn new() -> Self {
        Self {
            blocks: Vec::new(),
            pending: Vec::new(),
            context: Context::Top,
            spaced: false,
        }
    }

    fn push_block(&mut self, kind: BlockKind) {
        self.blocks.push(Block {
            spaced: std::mem::take(&mut self.spaced),
            kind,
        });
    }

    /// Append a line to the current verbatim run, or start a new one
    fn verbatim(&mut self, line: String) {
        if !self.spaced
            && let Some(Block {
                kind: BlockKind::Verbatim(lines),
                ..
            }) = self.blocks.last_mut()
        {
            lines.push(line);
            return;
        }
        self.push_block(BlockKind::Verbatim(vec![line]));
    }

    fn flush_pending(&mut self) {
        for line in std::mem::take(&mut self.pending) {
            self.verbatim(line);
        }
    }

    fn last_stanza(&mut self) -> Option<&mut Adapter> {
        self.blocks.iter_mut().rev().find_map(|block| match &mut block.kind {
            BlockKind::Stanza(adapter) => Some(adapter),
            BlockKind::Verbatim(_) => None,
        })
    }

    /// Start a stanza, claiming the pending lines that belong to it
    ///
    /// `auto`/`allow-hotplug` lines naming only this interface become flags
    /// and the comments above them move with the stanza. Any other pending
    /// `auto` line stays verbatim, together with the comments around it.
    fn stanza(&mut self, mut adapter: Adapter) {
        let mut rest = Vec::new();
        for line in std::mem::take(&mut self.pending) {
            let mut words = line.split_whitespace();
            let keyword = words.next().unwrap_or_default();
            let names: Vec<&str> = words.collect();
            let own = names.as_slice() == [adapter.name.as_str()];
            if own && AUTO_KEYWORDS.contains(&keyword) {
                adapter.auto = true;
            } else if own && keyword == HOTPLUG_KEYWORD {
                adapter.hotplug = true;
            } else {
                rest.push(line);
            }
        }

        if rest.iter().any(|line| !line.trim_start().starts_with('#')) {
            self.pending = rest;
            self.flush_pending();
        } else {
            adapter.comments = rest;
        }
        self.push_block(BlockKind::Stanza(adapter));
        self.context = Context::Stanza;
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush_pending();
        self.blocks
    }
}

impl InterfacesFile {
    /// An empty set bound to `path`
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            backup: false,
            blocks: Vec::new(),
        }
    }

    /// Load and parse the file at `path`
    ///
    /// A missing file loads as an empty set so the first write creates it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => {
                let file = Self::parse(path, &content)?;
                debug!(
                    "Loaded {} adapters from {}",
                    file.stanzas().count(),
                    path.display()
                );
                Ok(file)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("{} does not exist, starting empty", path.display());
                Ok(Self::empty(path))
            }
            Err(source) => Err(PersistenceError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Parse file content; `path` is only used in error messages
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self, PersistenceError> {
        let mut file = Self::empty(path);
        let mut parser = Parser::new();

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim_end();
            let trimmed = line.trim_start();

            if trimmed.is_empty() {
                parser.flush_pending();
                parser.spaced = true;
                continue;
            }
            if trimmed.starts_with('#') {
                parser.pending.push(line.to_string());
                continue;
            }

            let mut words = trimmed.split_whitespace();
            let keyword = words.next().unwrap_or_default();

            if AUTO_KEYWORDS.contains(&keyword) || keyword == HOTPLUG_KEYWORD {
                parser.pending.push(line.to_string());
                parser.context = Context::Top;
            } else if keyword == "iface" {
                let fields: Vec<&str> = words.collect();
                if let [name, family, method] = fields.as_slice() {
                    parser.stanza(Adapter::new(*name, *family, *method));
                } else {
                    debug!("Keeping unrecognized stanza verbatim: {}", trimmed);
                    parser.flush_pending();
                    parser.verbatim(line.to_string());
                    parser.context = Context::Verbatim;
                }
            } else if keyword == "mapping" {
                parser.flush_pending();
                parser.verbatim(line.to_string());
                parser.context = Context::Verbatim;
            } else if VERBATIM_KEYWORDS.contains(&keyword) {
                parser.flush_pending();
                parser.verbatim(line.to_string());
                parser.context = Context::Top;
            } else {
                match parser.context {
                    Context::Stanza => {
                        let value = trimmed[keyword.len()..].trim().to_string();
                        let comments = std::mem::take(&mut parser.pending);
                        if let Some(adapter) = parser.last_stanza() {
                            let position = adapter.options.len();
                            adapter
                                .inner_comments
                                .extend(comments.into_iter().map(|c| (position, c)));
                            adapter.options.push((keyword.to_string(), value));
                        }
                    }
                    Context::Verbatim => {
                        parser.flush_pending();
                        parser.verbatim(line.to_string());
                    }
                    Context::Top => {
                        return Err(file.parse_error(
                            idx + 1,
                            &format!("option '{keyword}' outside of an iface stanza"),
                        ));
                    }
                }
            }
        }

        file.blocks = parser.finish();
        Ok(file)
    }

    fn parse_error(&self, line: usize, message: &str) -> PersistenceError {
        PersistenceError::Parse {
            path: self.path.clone(),
            line,
            message: message.to_string(),
        }
    }

    /// Copy the current file to `<path>.bak` before each write
    pub fn with_backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn stanzas(&self) -> impl Iterator<Item = &Adapter> {
        self.blocks.iter().filter_map(Block::stanza)
    }

    /// All stanzas in file order
    pub fn adapters(&self) -> Vec<&Adapter> {
        self.stanzas().collect()
    }

    /// First stanza with the given name
    pub fn find(&self, name: &str) -> Option<&Adapter> {
        self.stanzas().find(|a| a.name == name)
    }

    /// The wizard-managed record for `name`, if its stanza is one
    pub fn existing_record(&self, name: &InterfaceName) -> Option<AdapterRecord> {
        self.stanzas()
            .filter(|a| a.name == name.as_str())
            .find_map(Adapter::to_record)
    }

    /// Names of all stanzas in file order, without duplicates
    pub fn adapter_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.stanzas()
            .filter(|a| seen.insert(a.name.as_str()))
            .map(|a| a.name.clone())
            .collect()
    }

    /// Insert an adapter before the `index`-th stanza, or at the end
    pub fn add_adapter(&mut self, adapter: Adapter, index: usize) {
        debug!("Adding adapter {} at position {}", adapter.name, index);
        let position = self
            .blocks
            .iter()
            .enumerate()
            .filter(|(_, block)| block.stanza().is_some())
            .nth(index)
            .map(|(position, _)| position);

        let block = Block {
            spaced: true,
            kind: BlockKind::Stanza(adapter),
        };
        match position {
            Some(position) => {
                self.blocks[position].spaced = true;
                self.blocks.insert(position, block);
            }
            None => self.blocks.push(block),
        }
    }

    /// Remove every `inet` stanza named `name`; returns how many were removed
    ///
    /// Stanzas of other address families for the same interface (inet6, ...)
    /// are left in place.
    pub fn remove_adapter_by_name(&mut self, name: &str) -> usize {
        let mut removed = 0;
        let mut idx = 0;
        while idx < self.blocks.len() {
            let matches = self.blocks[idx]
                .stanza()
                .is_some_and(|a| a.name == name && a.family == FAMILY_INET);
            if matches {
                let spaced = self.blocks.remove(idx).spaced;
                if let Some(next) = self.blocks.get_mut(idx) {
                    next.spaced |= spaced;
                }
                removed += 1;
            } else {
                idx += 1;
            }
        }
        if removed > 0 {
            debug!("Removed {} stanza(s) for {}", removed, name);
        }
        removed
    }

    /// Serialize to the interfaces file format
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (idx, block) in self.blocks.iter().enumerate() {
            if idx > 0 && block.spaced {
                out.push('\n');
            }
            match &block.kind {
                BlockKind::Verbatim(lines) => {
                    for line in lines {
                        out.push_str(line);
                        out.push('\n');
                    }
                }
                BlockKind::Stanza(adapter) => adapter.render(&mut out),
            }
        }
        out
    }

    /// Write the full set back to disk
    ///
    /// The content goes to a temporary file in the same directory which is
    /// then renamed over the target, so readers never see a partial file.
    pub fn write(&self) -> Result<(), PersistenceError> {
        let path = &self.path;
        let write_err = |source| PersistenceError::Write {
            path: path.clone(),
            source,
        };

        let existing_mode = fs::metadata(path).ok().map(|m| m.permissions().mode());
        if self.backup && existing_mode.is_some() {
            let backup_path = backup_path(path);
            fs::copy(path, &backup_path).map_err(|source| PersistenceError::Backup {
                path: backup_path.clone(),
                source,
            })?;
            debug!("Backed up {} to {}", path.display(), backup_path.display());
        }

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(self.render().as_bytes()).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        let mode = existing_mode.unwrap_or(DEFAULT_MODE);
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(mode))
            .map_err(write_err)?;
        tmp.persist(path).map_err(|e| write_err(e.error))?;

        debug!(
            "Wrote {} adapters to {}",
            self.stanzas().count(),
            path.display()
        );
        Ok(())
    }
}

/// `<path>.bak` next to the interfaces file
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".bak");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# This file describes the network interfaces available on your system
source /etc/network/interfaces.d/*

auto lo
iface lo inet loopback

allow-hotplug eth0
iface eth0 inet static
    address 192.168.1.10
    netmask 255.255.255.0
    gateway 192.168.1.1
    dns-nameservers 1.1.1.1 8.8.8.8

# uplink
auto eth1
iface eth1 inet dhcp
";

    const DEBIAN_DEFAULT: &str = "\
# This file describes the network interfaces available on your system
# and how to activate them. For more information, see interfaces(5).

source /etc/network/interfaces.d/*

# The loopback network interface
auto lo
iface lo inet loopback

# The primary network interface
allow-hotplug eth0
iface eth0 inet dhcp
";

    fn sample() -> InterfacesFile {
        InterfacesFile::parse("/tmp/interfaces", SAMPLE).unwrap()
    }

    fn static_eth0() -> Adapter {
        Adapter::from(&AdapterRecord::static_ip(
            InterfaceName::new("eth0").unwrap(),
            StaticParams::new("10.0.0.5", "255.255.255.0", "10.0.0.1"),
        ))
    }

    #[test]
    fn test_parse_stanzas() {
        let file = sample();
        let adapters = file.adapters();
        let names: Vec<&str> = adapters.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["lo", "eth0", "eth1"]);

        let lo = file.find("lo").unwrap();
        assert!(lo.auto);
        assert_eq!(lo.method, "loopback");

        let eth0 = file.find("eth0").unwrap();
        assert!(!eth0.auto);
        assert!(eth0.hotplug);
        assert_eq!(eth0.option("address"), Some("192.168.1.10"));
        assert_eq!(eth0.option("dns-nameservers"), Some("1.1.1.1 8.8.8.8"));

        let eth1 = file.find("eth1").unwrap();
        assert!(eth1.auto);
        assert_eq!(eth1.comments, vec!["# uplink".to_string()]);
    }

    #[test]
    fn test_unchanged_file_renders_identically() {
        assert_eq!(sample().render(), SAMPLE);
        let debian = InterfacesFile::parse("x", DEBIAN_DEFAULT).unwrap();
        assert_eq!(debian.render(), DEBIAN_DEFAULT);
    }

    #[test]
    fn test_replacing_eth0_keeps_debian_layout() {
        let mut file = InterfacesFile::parse("x", DEBIAN_DEFAULT).unwrap();
        assert_eq!(file.remove_adapter_by_name("eth0"), 1);
        file.add_adapter(static_eth0(), 0);

        assert_eq!(
            file.render(),
            "\
# This file describes the network interfaces available on your system
# and how to activate them. For more information, see interfaces(5).

source /etc/network/interfaces.d/*

auto eth0
iface eth0 inet static
    address 10.0.0.5
    netmask 255.255.255.0
    gateway 10.0.0.1

# The loopback network interface
auto lo
iface lo inet loopback
"
        );
    }

    #[test]
    fn test_inner_comment_and_late_source_stay_in_place() {
        let content = "\
auto eth1
iface eth1 inet static
    address 172.16.0.9
    # netmask was /16
    netmask 255.255.255.0
    gateway 172.16.0.1

auto wlan0
iface wlan0 inet dhcp

source /etc/network/interfaces.d/*
";
        let mut file = InterfacesFile::parse("x", content).unwrap();
        assert_eq!(file.render(), content);

        let eth1 = file.find("eth1").unwrap();
        assert_eq!(
            eth1.inner_comments,
            vec![(1, "    # netmask was /16".to_string())]
        );

        file.remove_adapter_by_name("wlan0");
        let rendered = file.render();
        assert!(rendered.starts_with("auto eth1\n"));
        assert!(rendered.contains("    # netmask was /16\n    netmask"));
        assert!(rendered.ends_with("\n\nsource /etc/network/interfaces.d/*\n"));
    }

    #[test]
    fn test_detached_comment_stays_when_stanza_removed() {
        let content = "# managed by hand\n\nauto eth0\niface eth0 inet dhcp\n";
        let mut file = InterfacesFile::parse("x", content).unwrap();
        assert!(file.find("eth0").unwrap().comments.is_empty());
        file.remove_adapter_by_name("eth0");
        assert_eq!(file.render(), "# managed by hand\n");
    }

    #[test]
    fn test_to_record_static_and_dhcp() {
        let file = sample();
        let eth0 = file.find("eth0").unwrap().to_record().unwrap();
        assert_eq!(
            eth0.static_params(),
            Some(&StaticParams::new("192.168.1.10", "255.255.255.0", "192.168.1.1"))
        );

        let eth1 = file.find("eth1").unwrap().to_record().unwrap();
        assert_eq!(eth1.source(), AddressSource::Dhcp);

        assert!(file.find("lo").unwrap().to_record().is_none());
    }

    #[test]
    fn test_to_record_incomplete_static_is_none() {
        let file =
            InterfacesFile::parse("x", "iface eth0 inet static\n  address 10.0.0.2\n").unwrap();
        assert!(file.find("eth0").unwrap().to_record().is_none());
    }

    #[test]
    fn test_render_record_stanza() {
        let mut file = InterfacesFile::empty("x");
        file.add_adapter(static_eth0(), 0);
        assert_eq!(
            file.render(),
            "auto eth0\niface eth0 inet static\n    address 10.0.0.5\n    netmask 255.255.255.0\n    gateway 10.0.0.1\n"
        );
    }

    #[test]
    fn test_add_and_remove() {
        let mut file = sample();
        let removed = file.remove_adapter_by_name("eth0");
        assert_eq!(removed, 1);
        assert!(file.find("eth0").is_none());
        assert_eq!(file.remove_adapter_by_name("eth0"), 0);

        let record = AdapterRecord::dhcp(InterfaceName::new("eth0").unwrap());
        file.add_adapter(Adapter::from(&record), 0);
        assert_eq!(file.adapters()[0].name, "eth0");
        assert!(file.render().starts_with(
            "# This file describes the network interfaces available on your system\n\
             source /etc/network/interfaces.d/*\n\nauto eth0\n"
        ));

        file.add_adapter(Adapter::new("eth9", "inet", "manual"), 100);
        assert_eq!(file.adapters().last().unwrap().name, "eth9");
    }

    #[test]
    fn test_remove_keeps_other_families() {
        let content = "\
auto eth0
iface eth0 inet static
    address 10.0.0.2
    netmask 255.255.255.0
    gateway 10.0.0.1

iface eth0 inet6 auto
";
        let mut file = InterfacesFile::parse("x", content).unwrap();
        assert_eq!(file.remove_adapter_by_name("eth0"), 1);

        let remaining = file.adapters();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].family, "inet6");
        assert_eq!(file.render(), "iface eth0 inet6 auto\n");
        assert!(file.existing_record(&InterfaceName::new("eth0").unwrap()).is_none());
    }

    #[test]
    fn test_orphan_auto_lines_are_kept() {
        let content = "auto eth3\niface eth0 inet dhcp\n";
        let mut file = InterfacesFile::parse("x", content).unwrap();
        assert_eq!(file.render(), content);
        assert!(!file.find("eth0").unwrap().auto);

        file.remove_adapter_by_name("eth0");
        assert_eq!(file.render(), "auto eth3\n");
    }

    #[test]
    fn test_multi_name_auto_line_is_verbatim() {
        let content = "auto lo eth0\n\niface lo inet loopback\n\niface eth0 inet dhcp\n";
        let mut file = InterfacesFile::parse("x", content).unwrap();
        assert_eq!(file.render(), content);

        file.remove_adapter_by_name("eth0");
        assert!(file.render().starts_with("auto lo eth0\n"));
    }

    #[test]
    fn test_mapping_block_is_verbatim() {
        let content = "mapping eth0\n    script /usr/local/sbin/map-scheme\n    map HOME eth0-home\n";
        let file = InterfacesFile::parse("x", content).unwrap();
        assert!(file.adapters().is_empty());
        assert_eq!(file.render(), content);
    }

    #[test]
    fn test_short_iface_line_is_kept_verbatim() {
        let content = "auto swp1\niface swp1\n    mtu 9000\n\nauto eth0\niface eth0 inet dhcp\n";
        let file = InterfacesFile::parse("x", content).unwrap();

        let adapters = file.adapters();
        assert_eq!(adapters.len(), 1);
        assert_eq!(adapters[0].name, "eth0");
        assert_eq!(file.adapter_names(), vec!["eth0".to_string()]);
        assert_eq!(file.render(), content);
    }

    #[test]
    fn test_parse_rejects_option_outside_stanza() {
        let err = InterfacesFile::parse("x", "    address 10.0.0.1\n").unwrap_err();
        assert!(matches!(err, PersistenceError::Parse { line: 1, .. }));
        assert!(err.to_string().contains("outside of an iface stanza"));
    }

    #[test]
    fn test_render_parse_is_stable() {
        let mut file = sample();
        file.remove_adapter_by_name("eth1");
        file.add_adapter(static_eth0(), 1);
        let first = file.render();
        let second = InterfacesFile::parse("x", &first).unwrap().render();
        assert_eq!(first, second);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = InterfacesFile::load(dir.path().join("interfaces")).unwrap();
        assert!(file.adapters().is_empty());
    }

    #[test]
    fn test_write_creates_backup_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("interfaces");
        fs::write(&path, SAMPLE).unwrap();

        let mut file = InterfacesFile::load(&path).unwrap().with_backup(true);
        file.remove_adapter_by_name("eth1");
        file.write().unwrap();

        assert_eq!(fs::read_to_string(backup_path(&path)).unwrap(), SAMPLE);
        let reloaded = InterfacesFile::load(&path).unwrap();
        assert!(reloaded.find("eth1").is_none());
        assert!(reloaded.find("eth0").is_some());
    }

    #[test]
    fn test_write_without_backup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("interfaces");
        InterfacesFile::empty(&path).write().unwrap();
        assert!(path.exists());
        assert!(!backup_path(&path).exists());
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("interfaces");
        let err = InterfacesFile::empty(&path).write().unwrap_err();
        assert!(matches!(err, PersistenceError::Write { .. }));
    }
}
