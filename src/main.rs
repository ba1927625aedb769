use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use vortex::{
    ClientConfig, FixedClock, Group, Identifier, InvitationTarget, LegacyClaims, TargetType,
    UserClaims, VortexClient,
};

#[derive(Parser, Debug)]
#[command(name = "vortex", about = "Mint Vortex tokens and manage invitations")]
struct Cli {
    /// API key (VRTX.<id>.<secret>)
    #[arg(long, env = "VORTEX_API_KEY", hide_env_values = true)]
    api_key: String,

    /// API root; overrides the config file
    #[arg(long, env = "VORTEX_API_BASE_URL")]
    base_url: Option<String>,

    /// YAML config file with `base_url` / `timeout_secs`
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Mint a token locally
    #[command(subcommand)]
    Token(TokenCommand),
    /// Call the invitation API
    #[command(subcommand)]
    Invitations(InvitationCommand),
}

#[derive(Subcommand, Debug)]
enum TokenCommand {
    /// User-object token
    User(UserArgs),
    /// Identifier/group token
    Legacy(LegacyArgs),
}

#[derive(Args, Debug)]
struct UserArgs {
    #[arg(long)]
    id: String,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    avatar_url: Option<String>,
    #[arg(long = "admin-scope")]
    admin_scopes: Vec<String>,
    #[arg(long = "allowed-domain")]
    allowed_domains: Vec<String>,
    /// Extra claim as key=value; the value is read as JSON when it parses
    #[arg(long = "claim", value_parser = parse_claim)]
    claims: Vec<(String, Value)>,
    /// Issue time in epoch seconds instead of now
    #[arg(long)]
    now: Option<i64>,
}

#[derive(Args, Debug)]
struct LegacyArgs {
    #[arg(long)]
    id: String,
    #[arg(long = "email")]
    emails: Vec<String>,
    #[arg(long = "sms")]
    phones: Vec<String>,
    /// Group as TYPE:ID:NAME
    #[arg(long = "group", value_parser = parse_group)]
    groups: Vec<Group>,
    #[arg(long)]
    role: Option<String>,
    #[arg(long)]
    now: Option<i64>,
}

#[derive(Subcommand, Debug)]
enum InvitationCommand {
    Get { id: String },
    ByTarget { target_type: TargetType, value: String },
    Revoke { id: String },
    ByGroup { group_type: String, group_id: String },
    DeleteGroup { group_type: String, group_id: String },
    Accept {
        #[arg(long)]
        target_type: TargetType,
        #[arg(long)]
        target_value: String,
        #[arg(required = true)]
        ids: Vec<String>,
    },
    Reinvite { id: String },
}

fn parse_claim(s: &str) -> Result<(String, Value), String> {
    let (key, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty claim name in '{s}'"));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

fn parse_group(s: &str) -> Result<Group, String> {
    let mut parts = s.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(group_type), Some(group_id), Some(name)) if !group_type.is_empty() => {
            Ok(Group::new(group_type, group_id, name))
        }
        _ => Err(format!("expected TYPE:ID:NAME, got '{s}'")),
    }
}

fn load_config(cli: &Cli) -> vortex::Result<ClientConfig> {
    let config = match &cli.config {
        Some(path) => ClientConfig::from_yaml_file(path)?,
        None => ClientConfig::default(),
    };
    Ok(match &cli.base_url {
        Some(url) => ClientConfig::new(url).timeout(config.timeout),
        None => config,
    })
}

fn with_now(client: VortexClient, now: Option<i64>) -> VortexClient {
    match now {
        Some(now) => client.with_clock(Arc::new(FixedClock(now))),
        None => client,
    }
}

fn print_json<T: Serialize>(value: &T) -> vortex::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli) -> vortex::Result<()> {
    let config = load_config(&cli)?;
    let client = VortexClient::new(cli.api_key, config)?;

    match cli.command {
        Command::Token(TokenCommand::User(args)) => {
            let mut claims = UserClaims::new(args.id);
            claims.email = args.email;
            claims.name = args.name;
            claims.avatar_url = args.avatar_url;
            if !args.admin_scopes.is_empty() {
                claims.admin_scopes = Some(args.admin_scopes);
            }
            if !args.allowed_domains.is_empty() {
                claims.allowed_email_domains = Some(args.allowed_domains);
            }
            for (key, value) in args.claims {
                claims = claims.with_claim(key, value);
            }

            let token = with_now(client, args.now).generate_jwt(&claims)?;
            println!("{}", token);
        }
        Command::Token(TokenCommand::Legacy(args)) => {
            let mut claims = LegacyClaims::new(args.id);
            claims.identifiers = args
                .emails
                .into_iter()
                .map(Identifier::email)
                .chain(args.phones.into_iter().map(Identifier::sms))
                .collect();
            claims.groups = args.groups;
            claims.role = args.role;

            let token = with_now(client, args.now).generate_legacy_jwt(&claims)?;
            println!("{}", token);
        }
        Command::Invitations(command) => match command {
            InvitationCommand::Get { id } => print_json(&client.get_invitation(&id).await?)?,
            InvitationCommand::ByTarget { target_type, value } => print_json(
                &client.get_invitations_by_target(target_type, &value).await?,
            )?,
            InvitationCommand::Revoke { id } => {
                client.revoke_invitation(&id).await?;
                println!("revoked {}", id);
            }
            InvitationCommand::ByGroup {
                group_type,
                group_id,
            } => print_json(
                &client
                    .get_invitations_by_group(&group_type, &group_id)
                    .await?,
            )?,
            InvitationCommand::DeleteGroup {
                group_type,
                group_id,
            } => {
                client
                    .delete_invitations_by_group(&group_type, &group_id)
                    .await?;
                println!("deleted invitations for {}/{}", group_type, group_id);
            }
            InvitationCommand::Accept {
                target_type,
                target_value,
                ids,
            } => {
                let target = InvitationTarget::new(target_type, target_value);
                print_json(&client.accept_invitations(ids, target).await?)?
            }
            InvitationCommand::Reinvite { id } => print_json(&client.reinvite(&id).await?)?,
        },
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    // Enable basic logging; set RUST_LOG=debug for request tracing.
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_claim_json_value() {
        assert_eq!(parse_claim("seats=5").unwrap(), ("seats".to_string(), json!(5)));
        assert_eq!(
            parse_claim("tags=[\"a\",\"b\"]").unwrap(),
            ("tags".to_string(), json!(["a", "b"]))
        );
    }

    #[test]
    fn test_parse_claim_string_fallback() {
        assert_eq!(
            parse_claim("tenant=acme").unwrap(),
            ("tenant".to_string(), json!("acme"))
        );
        assert_eq!(
            parse_claim("url=https://x.test/?a=b").unwrap(),
            ("url".to_string(), json!("https://x.test/?a=b"))
        );
    }

    #[test]
    fn test_parse_claim_rejects_missing_separator() {
        assert!(parse_claim("tenant").is_err());
        assert!(parse_claim("=x").is_err());
    }

    #[test]
    fn test_parse_group() {
        let group = parse_group("workspace:ws-1:Main: Team").unwrap();
        assert_eq!(group, Group::new("workspace", "ws-1", "Main: Team"));
        assert!(parse_group("workspace:ws-1").is_err());
    }

    #[test]
    fn test_cli_parses_token_user() {
        let cli = Cli::try_parse_from([
            "vortex",
            "--api-key",
            "VRTX.AAAAAAAAAAAAAAAAAAAAAA.secret123",
            "token",
            "user",
            "--id",
            "user-123",
            "--admin-scope",
            "autojoin",
            "--claim",
            "seats=5",
            "--now",
            "1700000000",
        ])
        .unwrap();

        match cli.command {
            Command::Token(TokenCommand::User(args)) => {
                assert_eq!(args.id, "user-123");
                assert_eq!(args.admin_scopes, vec!["autojoin"]);
                assert_eq!(args.claims, vec![("seats".to_string(), json!(5))]);
                assert_eq!(args.now, Some(1_700_000_000));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_load_config_flag_overrides_default() {
        let cli = Cli::try_parse_from([
            "vortex",
            "--api-key",
            "k",
            "--base-url",
            "http://localhost:9000/",
            "invitations",
            "get",
            "inv-1",
        ])
        .unwrap();

        let config = load_config(&cli).unwrap();
        assert_eq!(config.base_url, "http://localhost:9000");
    }
}
