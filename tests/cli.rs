//! doxml 命令行测试
//!
//! 使用 `--from-xml` 合并现成的 XML, 不需要安装 doxygen

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

const INDEX: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='no'?>
<doxygenindex version="1.9.8">
  <compound refid="struct_point" kind="struct"><name>point</name>
    <member refid="struct_point_1a1" kind="variable"><name>x</name></member>
    <member refid="struct_point_1a2" kind="variable"><name>y</name></member>
  </compound>
  <compound refid="point_8h" kind="file"><name>point.h</name></compound>
</doxygenindex>
"#;

const STRUCT_POINT: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='no'?>
<doxygen version="1.9.8">
  <compounddef id="struct_point" kind="struct" language="C++" prot="public">
    <compoundname>point</compoundname>
    <briefdescription><para>A point in 2D space. </para></briefdescription>
  </compounddef>
</doxygen>
"#;

const POINT_H: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='no'?>
<doxygen version="1.9.8">
  <compounddef id="point_8h" kind="file" language="C++">
    <compoundname>point.h</compoundname>
  </compounddef>
</doxygen>
"#;

fn write_fixture(dir: &Path) {
    fs::write(dir.join("index.xml"), INDEX).unwrap();
    fs::write(dir.join("struct_point.xml"), STRUCT_POINT).unwrap();
    fs::write(dir.join("point_8h.xml"), POINT_H).unwrap();
}

fn doxml(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_doxml"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run doxml")
}

#[test]
fn test_version_flag() {
    let output = doxml(&["--version"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "doxml 1.0");
}

#[test]
fn test_combine_existing_xml_to_stdout() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());

    let output = doxml(&["--from-xml", dir.path().to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("<?xml"));
    assert!(stdout.contains("<doxygen version=\"1.9.8\">"));
    let point = stdout.find("id=\"struct_point\"").expect("struct compound");
    let file = stdout.find("id=\"point_8h\"").expect("file compound");
    assert!(point < file);
}

#[test]
fn test_combine_to_output_file_with_kind_filter() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());
    let out = dir.path().join("combined.xml");

    let output = doxml(&[
        "--from-xml",
        dir.path().to_str().unwrap(),
        "--kind",
        "file",
        "-o",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let xml = fs::read_to_string(&out).unwrap();
    assert!(xml.contains("id=\"point_8h\""));
    assert!(!xml.contains("id=\"struct_point\""));
}

#[test]
fn test_list_json() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());

    let output = doxml(&["--from-xml", dir.path().to_str().unwrap(), "--list", "--json"]);
    assert!(output.status.success());

    let items: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(items[0]["refid"], "struct_point");
    assert_eq!(items[0]["kind"], "struct");
    assert_eq!(items[0]["members"], 2);
    assert_eq!(items[1]["name"], "point.h");
}

#[test]
fn test_unknown_kind_fails() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());

    let output = doxml(&["--from-xml", dir.path().to_str().unwrap(), "--kind", "widget"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown compound kind"));
}

#[test]
fn test_missing_xml_dir_fails() {
    let dir = tempdir().unwrap();
    let output = doxml(&["--from-xml", dir.path().join("nope").to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_print_doxyfile() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.h"), "/** A */ int a;").unwrap();

    let output = doxml(&["--print-doxyfile", "-D", "API=", dir.path().to_str().unwrap()]);
    assert!(output.status.success());

    let doxyfile = String::from_utf8_lossy(&output.stdout);
    assert!(doxyfile.contains("GENERATE_XML"));
    assert!(doxyfile.contains("PREDEFINED"));
    assert!(doxyfile.contains("a.h"));
}

#[cfg(unix)]
#[test]
fn test_hanging_doxygen_version_check_times_out() {
    use std::os::unix::fs::PermissionsExt;
    use std::time::{Duration, Instant};

    let dir = tempdir().unwrap();
    let script = dir.path().join("doxygen");
    fs::write(&script, "#!/bin/sh\nexec sleep 10\n").unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    let header = dir.path().join("a.h");
    fs::write(&header, "/** A */\nint a;\n").unwrap();

    let started = Instant::now();
    let output = doxml(&[
        "--doxygen",
        script.to_str().unwrap(),
        "--timeout",
        "1",
        header.to_str().unwrap(),
    ]);

    assert!(!output.status.success());
    assert!(started.elapsed() < Duration::from_secs(8));
    assert!(String::from_utf8_lossy(&output.stderr).contains("timed out"));
}

#[test]
fn test_list_with_output_is_rejected() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());
    let out = dir.path().join("out.xml");

    let output = doxml(&[
        "--from-xml",
        dir.path().to_str().unwrap(),
        "--list",
        "-o",
        out.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(!out.exists());
}
