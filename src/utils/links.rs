use url::{Host, Url};

/// Whether `value` looks like a usable link: `scheme://host[...]` where the
/// host is an IP address or a domain with a top-level label.
pub fn is_valid_url(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return false;
    }

    let scheme_ok = value
        .split_once("://")
        .map(|(scheme, _)| !scheme.is_empty() && scheme.chars().all(|c| c.is_ascii_lowercase()))
        .unwrap_or(false);
    if !scheme_ok {
        return false;
    }

    let Ok(parsed) = Url::parse(value) else {
        return false;
    };

    match parsed.host() {
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
        Some(Host::Domain(domain)) => has_top_level_label(domain),
        None => false,
    }
}

fn has_top_level_label(domain: &str) -> bool {
    let mut labels = domain.split('.');
    let Some(tld) = labels.next_back() else {
        return false;
    };
    if labels.next().is_none() {
        return false;
    }

    let alphabetic = (2..=63).contains(&tld.len()) && tld.chars().all(|c| c.is_ascii_alphabetic());
    alphabetic || tld.starts_with("xn--")
}
