//! Écart type d’échantillon des nombres lus sur l’entrée standard.
//!
//! Usage:
//!   seq 1 1000 | ecart_type
//!   ecart_type < mesures.txt
//!
//! Les nombres sont séparés par des blancs (espaces, tabulations, retours à la ligne).
//! Journalisation : RUST_LOG=calculatrice_ivs=trace

use std::io::{self, Read};
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use calculatrice_ivs::noyau::format::format_resultat;
use calculatrice_ivs::noyau::stats::ecart_type;

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Erreur: {e:?}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let mut texte = String::new();
    io::stdin()
        .read_to_string(&mut texte)
        .context("lecture de l’entrée standard")?;

    let valeurs = lire_nombres(&texte)?;
    tracing::debug!(n = valeurs.len(), "nombres lus");

    let s = ecart_type(&valeurs).context("calcul de l’écart type")?;
    println!("{}", format_resultat(s));
    Ok(())
}

fn lire_nombres(texte: &str) -> Result<Vec<f64>> {
    texte
        .split_whitespace()
        .enumerate()
        .map(|(i, mot)| {
            mot.replace(',', ".")
                .parse::<f64>()
                .with_context(|| format!("nombre n°{} invalide : {mot:?}", i + 1))
        })
        .collect()
}
