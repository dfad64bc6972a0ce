use crate::domain::constants::{DEVICE_GROUP_ROOT, SHARED_ROOT};
use crate::domain::models::{ObjectType, Scope};

/// Path of the node that holds every entry of `object_type` in `scope`.
///
/// Scope names are not validated; the management API decides what exists.
pub fn container_xpath(scope: &Scope, object_type: ObjectType) -> String {
    match scope {
        Scope::Shared => format!("{}/{}", SHARED_ROOT, object_type.node_name()),
        Scope::DeviceGroup(name) => format!(
            "{}/entry[@name='{}']/{}",
            DEVICE_GROUP_ROOT,
            name,
            object_type.node_name()
        ),
    }
}

pub fn entry_xpath(scope: &Scope, object_type: ObjectType, name: &str) -> String {
    format!(
        "{}/entry[@name='{}']",
        container_xpath(scope, object_type),
        name
    )
}

#[cfg(test)]
mod tests {
    use super::{container_xpath, entry_xpath};
    use crate::domain::models::{ObjectType, Scope};

    #[test]
    fn shared_scope_matches_case_insensitively() {
        for raw in ["shared", "Shared", "SHARED"] {
            assert_eq!(
                container_xpath(&Scope::from(raw), ObjectType::Address),
                "/config/shared/address"
            );
        }
    }

    #[test]
    fn device_group_container_uses_group_name() {
        assert_eq!(
            container_xpath(&Scope::from("DG-A"), ObjectType::ServiceGroup),
            "/config/devices/entry[@name='localhost.localdomain']/device-group/entry[@name='DG-A']/service-group"
        );
    }

    #[test]
    fn entry_path_appends_name_qualified_child() {
        assert_eq!(
            entry_xpath(&Scope::Shared, ObjectType::AddressGroup, "web-servers"),
            "/config/shared/address-group/entry[@name='web-servers']"
        );
        let dg = entry_xpath(&Scope::from("branch"), ObjectType::Service, "tcp-8443");
        assert!(dg.starts_with(&container_xpath(&Scope::from("branch"), ObjectType::Service)));
        assert!(dg.ends_with("/service/entry[@name='tcp-8443']"));
    }
}
