//! Output shared by the menus and non-interactive mode.

use rhui_harness::model::{NodeKind, NodeRecord};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// `Hostname:` / `SSH Username:` / `SSH Private Key:` blocks, one per node.
pub fn node_listing(kind: NodeKind, nodes: &[NodeRecord]) -> String {
    let title = match kind {
        NodeKind::Cds => "RHUI Content Delivery Servers",
        NodeKind::HaProxy => "RHUI HAProxy Load-balancer Instances",
    };
    let mut text = format!("\n-= {title} =-\n\n");
    if nodes.is_empty() {
        let _ = writeln!(text, "No {} instances are registered.", kind.label());
        return text;
    }
    for node in nodes {
        let _ = write!(
            text,
            "  Hostname:             {}\n  SSH Username:         {}\n  SSH Private Key:      {}\n\n",
            node.host_name, node.ssh_user, node.ssh_key_path
        );
    }
    text
}

/// What the console makes of a content certificate file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Certificate {
    Missing,
    Incompatible,
    /// Entitlement names it grants.
    Entitlements(Vec<String>),
}

/// A file whose first line reads `incompatible` is refused; otherwise every
/// non-blank line names one entitlement.
pub fn read_certificate(path: &Path) -> Certificate {
    let Ok(data) = fs::read_to_string(path) else {
        return Certificate::Missing;
    };
    let mut lines = data.lines().map(str::trim).filter(|line| !line.is_empty());
    match lines.next() {
        Some("incompatible") => Certificate::Incompatible,
        Some(first) => Certificate::Entitlements(
            std::iter::once(first)
                .chain(lines)
                .map(ToString::to_string)
                .collect(),
        ),
        None => Certificate::Entitlements(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rhui_harness::screens::instance::parse_node_listing;

    #[test]
    fn listing_parses_back_into_nodes() {
        let nodes = vec![
            NodeRecord::new("cds01.example.com", "ec2-user", "/root/.ssh/a"),
            NodeRecord::new("cds02.example.com", "cloud-user", "/root/.ssh/b"),
        ];
        assert_eq!(parse_node_listing(&node_listing(NodeKind::Cds, &nodes)), nodes);
        assert!(parse_node_listing(&node_listing(NodeKind::HaProxy, &[])).is_empty());
    }

    #[test]
    fn certificates_are_read_line_by_line() {
        let dir = crate::temp_dir("certificate");
        let good = dir.join("good.crt");
        fs::write(&good, "RHEL 8 (RPMs)\n\nRHEL 9 (RPMs)\n").unwrap();
        let bad = dir.join("bad.crt");
        fs::write(&bad, "incompatible\n").unwrap();

        assert_eq!(
            read_certificate(&good),
            Certificate::Entitlements(vec!["RHEL 8 (RPMs)".into(), "RHEL 9 (RPMs)".into()])
        );
        assert_eq!(read_certificate(&bad), Certificate::Incompatible);
        assert_eq!(read_certificate(&dir.join("absent.crt")), Certificate::Missing);
    }
}
