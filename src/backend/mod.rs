//! Artifact emitters.
//!
//! Every emitter is a pure function of the read-only model; emission only
//! starts once model construction has fully succeeded, and each run renders
//! all artifacts before any of them becomes visible (see `cli::output`).
//!
//! ## Modules
//!
//! - `header` - native declarations (`<prefix>.h`)
//! - `csource` - glue structures, embedded prototype text, JSON blob and
//!   data record (`<prefix>.c`)
//! - `json` - the nested-array self-description
//! - `rst` - reference documentation, full and man variants
//! - `boilerplate` - static build-integration template
//! - `cdecl`, `text` - shared declaration/layout helpers

pub mod boilerplate;
pub mod cdecl;
pub mod csource;
pub mod header;
pub mod json;
pub mod rst;
pub mod text;

use rand::Rng;
use vmodc_syntax::model::ModuleModel;

/// The complete artifact set of one compilation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub header: String,
    pub csource: String,
    pub rst_full: String,
    pub rst_man: String,
    pub boilerplate: Option<String>,
}

/// Render every artifact for `model`.
///
/// `prefix` names the header/source pair; `file_id` is the per-build
/// identifier (see [`random_file_id`]) so runs are reproducible in tests.
pub fn emit_all(
    model: &ModuleModel,
    prefix: &str,
    file_id: &str,
    with_boilerplate: bool,
) -> Artifacts {
    tracing::debug!(module = %model.name, %prefix, "emitting artifacts");
    Artifacts {
        header: header::emit(model),
        csource: csource::emit(model, prefix, file_id),
        rst_full: rst::emit(model, false),
        rst_man: rst::emit(model, true),
        boilerplate: with_boilerplate.then(|| boilerplate::emit(&model.name)),
    }
}

/// A fresh 32-character build identifier in `'@'..='Z'`.
///
/// The runtime loader compares it against the loaded shared object to detect
/// stale or mismatched artifacts; it is the only part of the output that
/// differs between runs on identical input.
pub fn random_file_id() -> String {
    let mut rng = rand::thread_rng();
    (0..32)
        .map(|_| char::from(rng.gen_range(0x40u8..=0x5a)))
        .collect()
}
