//! The compile command: read input, build the model, emit and commit the
//! artifact set.

use std::fs;
use std::path::{Path, PathBuf};

use vmodc_syntax::Severity;

use crate::backend;

use super::output::OutputStager;
use super::{Cli, CliError, CliResult, ExitCode};

/// Run one compilation. Model construction must fully succeed before any
/// artifact is rendered, and all artifacts are staged before any becomes
/// visible.
pub fn compile(cli: &Cli) -> CliResult<ExitCode> {
    let input = resolve_input(cli.file.as_deref())?;
    tracing::info!(input = %input.display(), strict = cli.strict, "compiling");

    let source = fs::read_to_string(&input)
        .map_err(|e| CliError::failure(format!("ERROR: cannot read {}: {e}", input.display())))?;

    let model = match vmodc_syntax::parse(&source, cli.strict) {
        Ok(model) => model,
        Err(e) => {
            let prefix = match e.severity(cli.strict) {
                Severity::Error => "ERROR",
                Severity::Warning => "WARNING",
            };
            return Err(CliError::failure(format!("{prefix}: {e}")));
        }
    };
    for warning in &model.warnings {
        eprintln!("WARNING: {warning}");
    }

    let artifacts = backend::emit_all(
        &model,
        &cli.output,
        &backend::random_file_id(),
        cli.boilerplate,
    );

    let mut stager = OutputStager::new();
    let stage = |stager: &mut OutputStager, path: &Path, contents: &str| {
        stager
            .stage(path, contents)
            .map_err(|e| CliError::failure(format!("ERROR: cannot write {}: {e}", path.display())))
    };

    let header = PathBuf::from(format!("{}.h", cli.output));
    let csource = PathBuf::from(format!("{}.c", cli.output));
    stage(&mut stager, &header, &artifacts.header)?;
    stage(&mut stager, &csource, &artifacts.csource)?;
    stage(
        &mut stager,
        &cli.rstdir.join(format!("vmod_{}.rst", model.name)),
        &artifacts.rst_full,
    )?;
    stage(
        &mut stager,
        &cli.rstdir.join(format!("vmod_{}.man.rst", model.name)),
        &artifacts.rst_man,
    )?;
    if let Some(boilerplate) = &artifacts.boilerplate {
        stage(
            &mut stager,
            Path::new("automake_boilerplate.am"),
            boilerplate,
        )?;
    }

    stager
        .commit()
        .map_err(|e| CliError::failure(format!("ERROR: cannot commit outputs: {e}")))?;
    Ok(ExitCode::SUCCESS)
}

/// The explicit input file, or `vmod.vcc` in the working directory.
fn resolve_input(file: Option<&Path>) -> CliResult<PathBuf> {
    if let Some(file) = file {
        return Ok(file.to_path_buf());
    }
    let default = PathBuf::from("vmod.vcc");
    if default.exists() {
        Ok(default)
    } else {
        Err(CliError::failure(
            "ERROR: No vmod.vcc file supplied or found.",
        ))
    }
}
