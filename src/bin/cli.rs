use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use supplydesk::supplydesk_auth::{Claim, Principal, TokenIssuer};
use supplydesk::supplydesk_config::{CorsConfig, JwtConfig};

#[derive(Parser)]
#[command(name = "supplydesk-cli")]
#[command(about = "SupplyDesk CLI - Administrative tools for SupplyDesk", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Issue an access token signed with the configured JWT settings
    IssueToken {
        /// Subject (user id) of the token
        #[arg(short = 'i', long)]
        id: String,

        /// Email address of the subject
        #[arg(short = 'e', long)]
        email: String,

        /// Role to include, may be repeated
        #[arg(short = 'r', long = "role")]
        roles: Vec<String>,

        /// Claim as TYPE=VALUE, may be repeated (e.g. Fornecedor=Adicionar,Atualizar)
        #[arg(short = 'c', long = "claim", value_parser = parse_claim)]
        claims: Vec<Claim>,
    },
    /// Load and validate the configuration without starting the server
    CheckConfig,
}

fn parse_claim(raw: &str) -> Result<Claim, String> {
    match raw.split_once('=') {
        Some((claim_type, value)) if !claim_type.trim().is_empty() => {
            Ok(Claim::new(claim_type.trim(), value.trim()))
        }
        _ => Err(format!("expected TYPE=VALUE, got '{}'", raw)),
    }
}

fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::IssueToken {
            id,
            email,
            roles,
            claims,
        } => handle_issue_token(id, email, roles, claims),
        Commands::CheckConfig => handle_check_config(),
    }
}

fn load_config() -> JwtConfig {
    match JwtConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid JWT configuration: {}", e);
            process::exit(1);
        }
    }
}

fn handle_issue_token(id: String, email: String, roles: Vec<String>, claims: Vec<Claim>) {
    let config = Arc::new(load_config());

    let issued = TokenIssuer::new(config).and_then(|issuer| {
        let principal = Principal::authenticated(id, email).with_claims(claims);
        issuer.issue(&principal, &roles)
    });

    match issued.map(|token| serde_json::to_string_pretty(&token)) {
        Ok(Ok(json)) => println!("{}", json),
        Ok(Err(e)) => {
            eprintln!("❌ Error serializing token: {}", e);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("❌ Error issuing token: {}", e);
            process::exit(1);
        }
    }
}

fn handle_check_config() {
    let config = load_config();
    let cors = CorsConfig::from_env();

    println!("✅ Configuration is valid");
    println!("   Issuer: {}", config.issuer);
    println!("   Audience: {}", config.audience);
    println!("   Token lifetime: {}s", config.expires_in());
    println!("   Allowed origins: {}", cors.allowed_origins.join(", "));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_claim_splits_on_first_equals() {
        let claim = parse_claim("Fornecedor=Adicionar,Atualizar").unwrap();
        assert_eq!(claim, Claim::new("Fornecedor", "Adicionar,Atualizar"));
    }

    #[test]
    fn test_parse_claim_rejects_missing_type() {
        assert!(parse_claim("=Adicionar").is_err());
        assert!(parse_claim("Fornecedor").is_err());
    }

    #[test]
    fn test_cli_parses_repeated_claims() {
        let cli = Cli::try_parse_from([
            "supplydesk-cli",
            "issue-token",
            "--id",
            "user-1",
            "--email",
            "ana@example.com",
            "--role",
            "Admin",
            "--claim",
            "Fornecedor=Adicionar",
            "--claim",
            "Produto=Excluir",
        ])
        .unwrap();

        let Commands::IssueToken { roles, claims, .. } = cli.command else {
            panic!("expected issue-token");
        };
        assert_eq!(roles, vec!["Admin"]);
        assert_eq!(claims.len(), 2);
    }
}
