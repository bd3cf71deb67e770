mod common;

use common::{fgtree_cmd, fixture};
use predicates::prelude::*;
use serde_json::Value;

#[test]
fn test_list_paths_in_close_order() {
    fgtree_cmd()
        .arg(fixture("fgt60f.conf"))
        .arg("--no-lines")
        .assert()
        .success()
        .stdout(
            "system global\n\
             system interface > ipv6\n\
             system interface\n\
             system dns\n\
             firewall address\n\
             firewall policy\n\
             router static\n",
        );
}

#[test]
fn test_list_shows_line_ranges() {
    fgtree_cmd()
        .args(["-l"])
        .arg(fixture("fgt60f.conf"))
        .assert()
        .success()
        .stdout(predicate::str::contains("system interface > ipv6  21-23"))
        .stdout(predicate::str::contains("router static"));
}

#[test]
fn test_wildcard_search() {
    fgtree_cmd()
        .args(["-f", "system *", "--no-lines"])
        .arg(fixture("fgt60f.conf"))
        .assert()
        .success()
        .stdout("system global\nsystem interface > ipv6\nsystem interface\nsystem dns\n");
}

#[test]
fn test_search_is_case_insensitive_over_bodies() {
    fgtree_cmd()
        .args(["--search", "WAN1", "--no-lines"])
        .arg(fixture("fgt60f.conf"))
        .assert()
        .success()
        .stdout("system interface\nfirewall policy\nrouter static\n");
}

#[test]
fn test_show_section() {
    fgtree_cmd()
        .args(["-s", "system dns"])
        .arg(fixture("fgt60f.conf"))
        .assert()
        .success()
        .stdout(
            "config system dns\n    set primary 8.8.8.8\n    set secondary 8.8.4.4\nend\n",
        );
}

#[test]
fn test_unknown_section_suggests() {
    fgtree_cmd()
        .args(["-s", "sytem dns"])
        .arg(fixture("fgt60f.conf"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Section 'sytem dns' not found"))
        .stderr(predicate::str::contains("system dns"));
}

#[test]
fn test_show_interface() {
    fgtree_cmd()
        .args(["-i", "internal"])
        .arg(fixture("fgt60f.conf"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("    edit \"internal\"\n"))
        .stdout(predicate::str::contains("config ipv6"))
        .stdout(predicate::str::ends_with("    next\n"));
}

#[test]
fn test_interfaces_from_stdin() {
    let content = std::fs::read_to_string(fixture("fgt60f.conf")).unwrap();
    fgtree_cmd()
        .args(["--interfaces", "-"])
        .write_stdin(content)
        .assert()
        .success()
        .stdout("wan1\ninternal\n");
}

#[test]
fn test_invalid_utf8_rejected() {
    fgtree_cmd()
        .arg("-")
        .write_stdin(vec![0x63, 0x6f, 0xff, 0xfe])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid UTF-8"));
}

#[test]
fn test_tree_output() {
    fgtree_cmd()
        .arg("--tree")
        .arg(fixture("fgt60f.conf"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("├── system global\n├── system interface\n│   └── ipv6\n"))
        .stdout(predicate::str::ends_with("└── router static\n"));
}

#[test]
fn test_json_output() {
    let output = fgtree_cmd()
        .args(["-o", "json"])
        .arg(fixture("fgt60f.conf"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: Value = serde_json::from_slice(&output).unwrap();
    let document = &value["document"];
    assert_eq!(document["metadata"]["sectionCount"], 7);
    assert_eq!(document["metadata"]["interfaceCount"], 2);
    assert_eq!(document["metadata"]["maxDepth"], 2);
    assert_eq!(document["sections"][1]["path"], "system interface > ipv6");
    assert_eq!(document["interfaces"][0]["name"], "wan1");
}

#[test]
fn test_count() {
    fgtree_cmd()
        .arg("--count")
        .arg(fixture("fgt60f.conf"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Sections:   7"))
        .stdout(predicate::str::contains("Interfaces: 2"));
}

#[test]
fn test_export_search_results() {
    let dir = tempfile::tempdir().unwrap();
    fgtree_cmd()
        .args(["-f", "firewall*", "-e"])
        .arg(dir.path())
        .arg(fixture("fgt60f.conf"))
        .assert()
        .success();

    let address = std::fs::read_to_string(dir.path().join("firewall address.txt")).unwrap();
    assert!(address.starts_with("config firewall address\n"));
    assert!(address.ends_with("end"));
    assert!(dir.path().join("firewall policy.txt").exists());
    assert!(!dir.path().join("system dns.txt").exists());
}

#[test]
fn test_export_nested_section() {
    let dir = tempfile::tempdir().unwrap();
    fgtree_cmd()
        .args(["-s", "system interface > ipv6", "-e"])
        .arg(dir.path())
        .arg(fixture("fgt60f.conf"))
        .assert()
        .success()
        .stdout(predicate::str::contains("system interface_ipv6.txt"));

    let body = std::fs::read_to_string(dir.path().join("system interface_ipv6.txt")).unwrap();
    assert_eq!(
        body,
        "        config ipv6\n            set ip6-address 2001:db8::1/64\n        end"
    );
}
