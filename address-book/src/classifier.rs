//! Functional role classification for address categories.

use address_types::{AddressCategory, AddressRole, AddressRoleFlags, RequestedCategory, RoleSet};

/// Type list offered when role editing is enabled.
static ROLE_TYPES: [AddressRole; 4] = [
    AddressRole::Carrier,
    AddressRole::Shipper,
    AddressRole::Destination,
    AddressRole::Origin,
];

/// Type list offered with the reduced role model.
static BETTER_ROLE_TYPES: [AddressRole; 2] = [AddressRole::Origin, AddressRole::Destination];

/// Switches that change which type options an edit form offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillTypesOptions {
    /// Role-free mode: only origin and destination are ever offered.
    pub no_role: bool,
    pub better_roles: bool,
}

pub fn classify(category: &AddressCategory) -> RoleSet {
    match category {
        AddressCategory::BulkingBreak => RoleSet::from([
            AddressRole::Origin,
            AddressRole::Destination,
            AddressRole::Shipper,
            AddressRole::Carrier,
        ]),
        AddressCategory::Invoice => RoleSet::from([AddressRole::Shipper]),
        AddressCategory::Role(role) => RoleSet::from([role.clone()]),
    }
}

/// Roles an address already plays, from its own flags.
pub fn roles_from_flags(flags: &AddressRoleFlags) -> RoleSet {
    ROLE_TYPES
        .iter()
        .filter(|role| flags.has(role))
        .cloned()
        .collect()
}

/// Type options to present when editing an address: every known type the
/// address already has, or that the requested category asks for.
pub fn fill_types(
    flags: Option<&AddressRoleFlags>,
    category: Option<&RequestedCategory>,
    options: FillTypesOptions,
) -> Vec<AddressRole> {
    if options.no_role {
        return vec![AddressRole::Origin, AddressRole::Destination];
    }

    let types: &[AddressRole] = if options.better_roles {
        &BETTER_ROLE_TYPES
    } else {
        &ROLE_TYPES
    };

    types
        .iter()
        .filter(|role| {
            flags.is_some_and(|flags| flags.has(role))
                || category.is_some_and(|category| category.includes(role))
        })
        .cloned()
        .collect()
}
