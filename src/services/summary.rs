use crate::domain::models::ObjectType;
use crate::services::entry::{Element, Entry};

const FILTER_PREVIEW_CHARS: usize = 80;

/// One-line synopsis for the audit log. Missing fields render as empty
/// strings.
pub fn summarize(entry: &Entry) -> String {
    let el = entry.element();
    match entry {
        Entry::Address(_) => format!(
            "address: {} | {}",
            first_text(el, &["ip-netmask", "ip-range", "fqdn"]),
            first_text(el, &["description"])
        ),
        Entry::AddressGroup(_) => match el.find_text("dynamic/filter") {
            Some(filter) => {
                let preview: String = filter.chars().take(FILTER_PREVIEW_CHARS).collect();
                format!("addr-group(dynamic): filter='{}'", preview)
            }
            None => format!(
                "addr-group(static): members={}",
                el.find_all("static/member").len()
            ),
        },
        Entry::Service(_) => format!(
            "service: {} | {}",
            first_text(el, &["protocol/tcp/port", "protocol/udp/port"]),
            first_text(el, &["description"])
        ),
        Entry::ServiceGroup(_) => {
            format!("service-group: members={}", el.find_all("members/member").len())
        }
    }
}

fn first_text(el: &Element, paths: &[&str]) -> String {
    paths
        .iter()
        .find_map(|p| el.find_text(p))
        .unwrap_or_default()
}

/// Group members are resolved by name in the destination scope; a group that
/// lands where its members are not visible will fail validation at commit.
pub fn has_reference_risk(object_type: ObjectType, entry: Option<&Entry>) -> bool {
    object_type.is_group() && entry.is_some()
}
