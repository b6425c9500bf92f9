//! Mint an admin bearer token signed with the configured JWT_SECRET.

use chrono::Duration;
use site_backend::routes::auth::{create_access_token, ADMIN_ROLE, DEFAULT_JWT_SECRET, JWT_SECRET};
use std::env;

const DEFAULT_TTL_HOURS: i64 = 12;

/// Positive whole hours that fit in a token lifetime.
fn parse_ttl_hours(raw: &str) -> Option<(i64, Duration)> {
    let hours: i64 = raw.trim().parse().ok()?;
    if hours <= 0 {
        return None;
    }
    Duration::try_hours(hours).map(|ttl| (hours, ttl))
}

fn main() {
    dotenvy::dotenv().ok();

    let mut args = env::args().skip(1);
    let subject = args.next().unwrap_or_else(|| {
        eprintln!("Usage: cargo run --bin issue-token <SUBJECT> [TTL_HOURS]");
        std::process::exit(1);
    });
    let raw_ttl = args.next().unwrap_or_else(|| DEFAULT_TTL_HOURS.to_string());
    let (ttl_hours, ttl) = parse_ttl_hours(&raw_ttl).unwrap_or_else(|| {
        eprintln!("TTL_HOURS must be a positive whole number of hours, got '{}'", raw_ttl);
        eprintln!("Usage: cargo run --bin issue-token <SUBJECT> [TTL_HOURS]");
        std::process::exit(1);
    });

    if JWT_SECRET.as_str() == DEFAULT_JWT_SECRET {
        eprintln!("Warning: JWT_SECRET is not set; the token is signed with the default secret.");
    }

    match create_access_token(&subject, ADMIN_ROLE, ttl) {
        Ok(token) => {
            println!("\nSubject : {}", subject);
            println!("Expires : in {} hours", ttl_hours);
            println!("Token   : {}\n", token);
            println!("# Send it as:");
            println!("Authorization: Bearer {}", token);
        }
        Err(e) => {
            eprintln!("Error signing token: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ttl_hours() {
        assert_eq!(parse_ttl_hours("12").map(|(h, _)| h), Some(12));
        assert_eq!(parse_ttl_hours(" 1 ").map(|(_, d)| d), Some(Duration::hours(1)));
        assert!(parse_ttl_hours("0").is_none());
        assert!(parse_ttl_hours("-3").is_none());
        assert!(parse_ttl_hours("soon").is_none());
        assert!(parse_ttl_hours(&i64::MAX.to_string()).is_none());
    }
}
