//! Journalisation (natif).
//!
//! Sur le web, aucun abonné n’est installé : les macros `tracing` restent muettes.

/// Installe un abonné `tracing` par défaut (`RUST_LOG`, sinon `info`).
///
/// Renvoie `false` si un abonné global était déjà en place ; ce n’est pas une erreur.
#[cfg(not(target_arch = "wasm32"))]
#[must_use]
pub fn init_tracing() -> bool {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .try_init()
        .is_ok()
}
