//! Command handlers. Each returns the text to print on stdout.

use anyhow::{anyhow, bail};
use chrono::{Local, NaiveDate};
use fabulous_client::{FabulousClient, RecordType};

use crate::args::Args;
use crate::fields::Fields;
use crate::output;
use crate::portfolio::{self, SortKey, Summary};

/// Commands that talk to the registrar and therefore need credentials.
pub const REMOTE_COMMANDS: &[&str] = &[
    "list",
    "info",
    "check",
    "search",
    "expiring",
    "summary",
    "renew",
    "lock",
    "unlock",
    "autorenew",
    "privacy",
    "nameservers",
    "dns",
];

const DEFAULT_LIMIT: usize = 20;
const DEFAULT_EXPIRING_DAYS: i64 = 30;
const MIN_NAMESERVERS: usize = 2;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub async fn run(command: &str, mut args: Args, client: &FabulousClient) -> anyhow::Result<String> {
    let json = args.flag("json");
    match command {
        "list" => {
            let options = ListOptions::from_args(&args)?;
            list(client, options, json).await
        }
        "search" => {
            let mut options = ListOptions::from_args(&args)?;
            options.filter = Some(args.require("QUERY")?);
            list(client, options, json).await
        }
        "expiring" => {
            let mut options = ListOptions::from_args(&args)?;
            let days = match args.shift() {
                Some(raw) => raw
                    .parse::<i64>()
                    .map_err(|_| anyhow!("DAYS must be a number, got '{raw}'"))?,
                None => DEFAULT_EXPIRING_DAYS,
            };
            options.expiring = Some(days);
            list(client, options, json).await
        }
        "summary" => {
            let domains = client.domains().all().await?;
            let summary = Summary::build(&domains, today());
            if json {
                output::to_json(&summary)
            } else {
                Ok(output::summary(&summary))
            }
        }
        "info" => info(client, &args.require("DOMAIN")?, json).await,
        "check" => check(client, &args.require("DOMAIN")?, json).await,
        "renew" => {
            let domain = args.require("DOMAIN")?;
            let years = match args.shift() {
                Some(raw) => raw
                    .parse::<u32>()
                    .map_err(|_| anyhow!("YEARS must be a number, got '{raw}'"))?,
                None => 1,
            };
            client.domains().renew(&domain, years).await?;
            done(json, &format!("Renewed {domain} for {years} year(s)"))
        }
        "lock" => {
            let domain = args.require("DOMAIN")?;
            client.domains().lock(&domain).await?;
            done(json, &format!("Locked {domain}"))
        }
        "unlock" => {
            let domain = args.require("DOMAIN")?;
            client.domains().unlock(&domain).await?;
            done(json, &format!("Unlocked {domain}"))
        }
        "autorenew" => {
            let domain = args.require("DOMAIN")?;
            let enabled = on_off(&args.require("on|off")?)?;
            client.domains().set_auto_renew(&domain, enabled).await?;
            done(json, &format!("Auto-renew {} for {domain}", enabled_label(enabled)))
        }
        "privacy" => {
            let domain = args.require("DOMAIN")?;
            let enabled = on_off(&args.require("on|off")?)?;
            client.domains().set_whois_privacy(&domain, enabled).await?;
            done(json, &format!("WHOIS privacy {} for {domain}", enabled_label(enabled)))
        }
        "nameservers" => nameservers(client, args, json).await,
        "dns" => dns(client, args, json).await,
        other => bail!("Unknown command: {other}"),
    }
}

fn done(json: bool, message: &str) -> anyhow::Result<String> {
    if json {
        output::success_json(message)
    } else {
        Ok(format!("{message}\n"))
    }
}

fn on_off(raw: &str) -> anyhow::Result<bool> {
    match raw {
        "on" => Ok(true),
        "off" => Ok(false),
        other => bail!("Expected 'on' or 'off', got '{other}'"),
    }
}

fn enabled_label(enabled: bool) -> &'static str {
    if enabled { "enabled" } else { "disabled" }
}

// ============ Domain listing ============

#[derive(Debug, Default)]
struct ListOptions {
    page: Option<u32>,
    filter: Option<String>,
    sort: SortKey,
    expiring: Option<i64>,
    limit: Option<usize>,
}

impl ListOptions {
    fn from_args(args: &Args) -> anyhow::Result<Self> {
        Ok(Self {
            page: args.number("page")?,
            filter: args.option("filter").map(str::to_string),
            sort: args
                .option("sort")
                .map(str::parse::<SortKey>)
                .transpose()
                .map_err(|e: String| anyhow!(e))?
                .unwrap_or_default(),
            expiring: args.number("expiring")?,
            limit: args.number("limit")?,
        })
    }
}

async fn list(client: &FabulousClient, options: ListOptions, json: bool) -> anyhow::Result<String> {
    let mut domains = match options.page {
        Some(page) => client.domains().list_page(page).await?,
        None => client.domains().all().await?,
    };
    let today = today();
    if let Some(needle) = &options.filter {
        domains = portfolio::filter_by_name(domains, needle);
    }
    if let Some(days) = options.expiring {
        domains = portfolio::filter_expiring(domains, days, today);
    }
    portfolio::sort(&mut domains, options.sort);
    tracing::debug!(count = domains.len(), "domains after filtering");

    if json {
        return output::to_json(&domains);
    }
    if domains.is_empty() {
        return Ok("No domains found matching your criteria\n".to_string());
    }
    Ok(output::domains_table(
        &domains,
        options.limit.unwrap_or(DEFAULT_LIMIT),
        today,
    ))
}

// ============ Single domain ============

async fn info(client: &FabulousClient, domain: &str, json: bool) -> anyhow::Result<String> {
    let info = client
        .domains()
        .info(domain)
        .await?
        .ok_or_else(|| anyhow!("Domain not found or no information available"))?;
    if json {
        output::to_json(&info)
    } else {
        Ok(output::domain_info(domain, &info))
    }
}

async fn check(client: &FabulousClient, domain: &str, json: bool) -> anyhow::Result<String> {
    let available = client.domains().check(domain).await?;
    if json {
        return output::to_json(&serde_json::json!({ "domain": domain, "available": available }));
    }
    Ok(match available {
        Some(true) => format!("{domain} is available\n"),
        Some(false) => format!("{domain} is not available\n"),
        None => format!("Availability of {domain} is unknown\n"),
    })
}

async fn nameservers(client: &FabulousClient, mut args: Args, json: bool) -> anyhow::Result<String> {
    let sub = args.require("get|set")?;
    let domain = args.require("DOMAIN")?;
    match sub.as_str() {
        "get" => {
            let list = client.domains().nameservers(&domain).await?.unwrap_or_default();
            if json {
                output::to_json(&list)
            } else if list.is_empty() {
                Ok("No nameservers found\n".to_string())
            } else {
                Ok(format!("Nameservers for {domain}:\n{}", output::numbered(&list)))
            }
        }
        "set" => {
            let list = args.rest();
            if list.len() < MIN_NAMESERVERS {
                bail!("At least {MIN_NAMESERVERS} nameservers required");
            }
            client.domains().set_nameservers(&domain, list.as_slice()).await?;
            done(json, &format!("Nameservers updated for {domain}"))
        }
        other => bail!("Unknown nameservers subcommand: {other}"),
    }
}

// ============ DNS ============

fn record_type(raw: &str) -> anyhow::Result<RecordType> {
    raw.parse().map_err(|e: String| anyhow!(e))
}

async fn dns(client: &FabulousClient, mut args: Args, json: bool) -> anyhow::Result<String> {
    let sub = args.require("list|add|update|delete")?;
    let domain = args.require("DOMAIN")?;
    let dns = client.dns();
    match sub.as_str() {
        "list" => {
            let filter = args.option("type").map(record_type).transpose()?;
            let records = dns.list_records(&domain, filter).await?;
            if json {
                output::to_json(&records)
            } else if records.is_empty() {
                Ok("No DNS records found\n".to_string())
            } else {
                Ok(output::records_table(&records))
            }
        }
        "add" => {
            let kind = record_type(&args.require("TYPE")?)?;
            let fields = Fields::parse(&args.rest())?;
            let data = fields.record_data(kind)?;
            dns.add_record(&domain, &data, fields.ttl()?).await?;
            done(json, &format!("Added {kind} record to {domain}"))
        }
        "update" => {
            let kind = record_type(&args.require("TYPE")?)?;
            let id = args.require("ID")?;
            let fields = Fields::parse(&args.rest())?;
            let update = fields.record_update(kind)?;
            dns.update_record(&domain, &id, &update, fields.ttl()?).await?;
            done(json, &format!("Updated {kind} record {id} on {domain}"))
        }
        "delete" => {
            let kind = record_type(&args.require("TYPE")?)?;
            let id = args.require("ID")?;
            dns.delete_record(&domain, kind, &id).await?;
            done(json, &format!("Deleted {kind} record {id} from {domain}"))
        }
        other => bail!("Unknown dns subcommand: {other}"),
    }
}
