//! Shell-level tests: the compile command, output staging and atomicity.

use std::fs;
use std::path::PathBuf;

use vmodc::cli::{Cli, commands};

const DEMO: &str = include_str!("fixtures/demo.vcc");

fn cli_for(dir: &std::path::Path, input: &str, strict: bool) -> Cli {
    fs::write(dir.join("vmod.vcc"), input).expect("write input");
    Cli {
        file: Some(dir.join("vmod.vcc")),
        strict,
        output: dir.join("vcc_if").to_string_lossy().into_owned(),
        rstdir: dir.to_path_buf(),
        boilerplate: false,
    }
}

#[test]
fn compile_produces_the_full_artifact_set() {
    let dir = tempfile::tempdir().unwrap();
    let cli = cli_for(dir.path(), DEMO, true);

    commands::compile(&cli).expect("compile must succeed");

    let header = fs::read_to_string(dir.path().join("vcc_if.h")).unwrap();
    let csource = fs::read_to_string(dir.path().join("vcc_if.c")).unwrap();
    let rst = fs::read_to_string(dir.path().join("vmod_demo.rst")).unwrap();
    let man = fs::read_to_string(dir.path().join("vmod_demo.man.rst")).unwrap();

    assert!(header.contains("VCL_INT vmod_add(VRT_CTX, VCL_INT, VCL_INT);"));
    assert!(csource.contains("const struct vmod_data Vmod_demo_Data = {"));
    assert!(rst.contains("CONTENTS"));
    assert!(!man.contains("CONTENTS"));

    // No staging leftovers.
    for entry in fs::read_dir(dir.path()).unwrap() {
        let name = entry.unwrap().file_name();
        assert!(
            !name.to_string_lossy().ends_with(".tmp"),
            "leftover staging file {name:?}"
        );
    }
}

#[test]
fn file_id_is_the_only_unstable_output() {
    let dir = tempfile::tempdir().unwrap();
    let cli = cli_for(dir.path(), DEMO, true);

    commands::compile(&cli).expect("first compile");
    let first = fs::read_to_string(dir.path().join("vcc_if.c")).unwrap();
    let first_rst = fs::read_to_string(dir.path().join("vmod_demo.rst")).unwrap();

    commands::compile(&cli).expect("second compile");
    let second = fs::read_to_string(dir.path().join("vcc_if.c")).unwrap();
    let second_rst = fs::read_to_string(dir.path().join("vmod_demo.rst")).unwrap();

    assert_eq!(first_rst, second_rst);

    // The sources differ only in the 32-character random file id.
    let extract_id = |c: &str| -> String {
        let tag = "\t.file_id =\t\"";
        let start = c.find(tag).expect("file_id present") + tag.len();
        c[start..start + 32].to_string()
    };
    let (id1, id2) = (extract_id(&first), extract_id(&second));
    assert_eq!(id1.len(), 32);
    assert_eq!(first.replace(&id1, &id2), second);
}

#[test]
fn failed_parse_leaves_no_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let bad = "$Module demo 3 d\n\n$Function BOGUS f()\n";
    let cli = cli_for(dir.path(), bad, true);

    let err = commands::compile(&cli).expect_err("must fail");
    assert!(err.message.starts_with("ERROR: "));
    assert_eq!(err.exit_code.0, 1);

    assert!(!PathBuf::from(format!("{}.h", cli.output)).exists());
    assert!(!PathBuf::from(format!("{}.c", cli.output)).exists());
    assert!(!dir.path().join("vmod_demo.rst").exists());
}

#[test]
fn vocabulary_error_is_a_warning_in_lenient_mode_but_still_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let bad = "$Module demo 3 d\n\n$Function BOGUS f()\n";
    let cli = cli_for(dir.path(), bad, false);

    let err = commands::compile(&cli).expect_err("emission cannot proceed");
    assert!(err.message.starts_with("WARNING: "));
    assert_eq!(err.exit_code.0, 1);
    assert!(!PathBuf::from(format!("{}.h", cli.output)).exists());
}

#[test]
fn structural_error_is_fatal_even_in_lenient_mode() {
    let dir = tempfile::tempdir().unwrap();
    let bad = "$Module demo 3 d\n\n$ABI loose\n";
    let cli = cli_for(dir.path(), bad, false);

    let err = commands::compile(&cli).expect_err("must fail");
    assert!(err.message.starts_with("ERROR: "));
}

#[test]
fn missing_input_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let cli = Cli {
        file: Some(dir.path().join("absent.vcc")),
        strict: true,
        output: dir.path().join("vcc_if").to_string_lossy().into_owned(),
        rstdir: dir.path().to_path_buf(),
        boilerplate: false,
    };
    let err = commands::compile(&cli).expect_err("must fail");
    assert!(err.message.starts_with("ERROR: "));
}
