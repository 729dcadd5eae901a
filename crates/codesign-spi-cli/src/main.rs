//! Command-line interface for codesign-spi.
//!
//! Signs bundles and binaries with a certificate and private key held in
//! memory, and reads signatures back, using the platform code signer.

use clap::{Args, Parser, Subcommand};
use codesign_spi::{signer, CodesignSigner, Error, Signer, SigningCredentials};
use secrecy::{ExposeSecret, SecretString};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "codesign-spi")]
#[command(about = "Code signing without touching the keychain")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign an app bundle or Mach-O binary in place
    Sign {
        /// Bundle or binary to sign
        path: PathBuf,

        #[command(flatten)]
        credentials: CredentialArgs,

        /// Entitlements property list to embed
        #[arg(short, long)]
        entitlements: Option<PathBuf>,

        /// Code signing identifier (defaults to the bundle identifier)
        #[arg(short, long)]
        identifier: Option<String>,
    },

    /// Print the entitlements embedded in a signature
    Entitlements {
        /// Signed bundle or binary
        path: PathBuf,
    },

    /// Check that a signature is intact
    Verify {
        /// Signed bundle or binary
        path: PathBuf,
    },

    /// Show what a certificate/key pair would sign as
    Identity {
        #[command(flatten)]
        credentials: CredentialArgs,
    },
}

#[derive(Args)]
struct CredentialArgs {
    /// Certificate file (PEM or DER format)
    #[arg(short = 'c', long)]
    certificate: Option<PathBuf>,

    /// Private key file (PEM or DER format)
    #[arg(short = 'k', long)]
    private_key: Option<PathBuf>,

    /// PKCS#12 file (.p12)
    #[arg(short = 'p', long)]
    pkcs12: Option<PathBuf>,

    /// Password for the PKCS#12 file
    #[arg(long, env = "CODESIGN_SPI_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "codesign_spi=debug"
    } else {
        "codesign_spi=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Command::Sign {
            path,
            credentials,
            entitlements,
            identifier,
        } => {
            let credentials = load_credentials(credentials)?;
            let entitlements = entitlements.map(std::fs::read).transpose()?;

            let mut codesigner = CodesignSigner::new(credentials);
            if let Some(identifier) = identifier {
                codesigner = codesigner.identifier(identifier);
            }
            codesigner.codesign(&path, entitlements.as_deref())?;

            println!("Signed: {}", path.display());
        }
        Command::Entitlements { path } => {
            let entitlements = signer::analyze(&path)?;
            print!("{}", String::from_utf8_lossy(&entitlements));
        }
        Command::Verify { path } => {
            signer::verify(&path)?;
            let info = signer::signing_information(&path)?;
            println!(
                "{}: valid on disk (identifier: {}, team: {})",
                path.display(),
                info.identifier.as_deref().unwrap_or("-"),
                info.team_id.as_deref().unwrap_or("-"),
            );
        }
        Command::Identity { credentials } => {
            let credentials = load_credentials(credentials)?;
            let key = credentials.key_representation()?;

            println!(
                "Common name: {}",
                credentials.common_name().as_deref().unwrap_or("-")
            );
            println!("Team ID:     {}", credentials.team_id.as_deref().unwrap_or("-"));
            println!("Key:         {} ({} bits)", key.kind, key.bits);
            println!("Chain:       {} certificate(s)", credentials.cert_chain.len());
        }
    }

    Ok(())
}

fn load_credentials(args: CredentialArgs) -> Result<SigningCredentials, Box<dyn std::error::Error>> {
    let password = args.password.map(SecretString::new);

    if let Some(ref p12_path) = args.pkcs12 {
        if args.certificate.is_some() || args.private_key.is_some() {
            return Err("Cannot specify both --pkcs12 and --certificate/--private-key".into());
        }
        let p12_data = std::fs::read(p12_path)?;
        let password = password.as_ref().map(|p| p.expose_secret().as_str()).unwrap_or("");
        let creds = SigningCredentials::from_p12(&p12_data, password)?;
        return Ok(creds);
    }

    match (&args.certificate, &args.private_key) {
        (Some(cert_path), Some(key_path)) => {
            if password.is_some() {
                tracing::warn!("--password only applies to PKCS#12 files; ignoring it");
            }
            let cert_data = std::fs::read(cert_path)?;
            let key_data = std::fs::read(key_path)?;
            let creds = SigningCredentials::from_pem(&cert_data, &key_data)?;
            Ok(creds)
        }
        (Some(_), None) => Err(Error::MissingCredentials("--certificate requires --private-key".into()).into()),
        (None, Some(_)) => Err(Error::MissingCredentials("--private-key requires --certificate".into()).into()),
        (None, None) => Err(Error::MissingCredentials(
            "Must provide either --pkcs12 or both --certificate and --private-key".into(),
        )
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../codesign-spi/tests/fixtures")
            .join(name)
    }

    fn args(certificate: Option<&str>, private_key: Option<&str>) -> CredentialArgs {
        CredentialArgs {
            certificate: certificate.map(fixture),
            private_key: private_key.map(fixture),
            pkcs12: None,
            password: None,
        }
    }

    fn missing_credentials(args: CredentialArgs) -> bool {
        match load_credentials(args) {
            Err(e) => matches!(e.downcast_ref::<Error>(), Some(Error::MissingCredentials(_))),
            Ok(_) => false,
        }
    }

    #[test]
    fn test_no_credentials_given() {
        assert!(missing_credentials(args(None, None)));
    }

    #[test]
    fn test_incomplete_pair() {
        assert!(missing_credentials(args(Some("ec_cert.pem"), None)));
        assert!(missing_credentials(args(None, Some("ec_key.pem"))));
    }

    #[test]
    fn test_pkcs12_conflicts_with_pair() {
        let mut conflicting = args(Some("ec_cert.pem"), Some("ec_key.pem"));
        conflicting.pkcs12 = Some(fixture("rsa.p12"));
        let err = load_credentials(conflicting).err().unwrap();
        assert!(err.to_string().contains("Cannot specify both"));
    }

    #[test]
    fn test_certificate_and_key() {
        let creds = load_credentials(args(Some("ec_cert.pem"), Some("ec_key.pem"))).unwrap();
        assert_eq!(creds.team_id.as_deref(), Some("ABCDE12345"));
    }

    #[test]
    fn test_cli_parses_sign_command() {
        let cli = Cli::try_parse_from([
            "codesign-spi",
            "sign",
            "Example.app",
            "--pkcs12",
            "identity.p12",
            "--password",
            "fixture",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Sign { .. }));
    }
}
