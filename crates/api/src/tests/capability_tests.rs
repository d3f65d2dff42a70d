// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hm_ledger_domain::{PermissionAction, Role};

use crate::{
    AuthenticatedActor, Capability, RoleCapabilities, compute_capabilities,
    compute_role_capabilities,
};

#[test]
fn test_capabilities_list_every_action() {
    let caps: RoleCapabilities = compute_role_capabilities(Role::Recrue);
    assert_eq!(caps.actions.len(), PermissionAction::ALL.len());
}

#[test]
fn test_recrue_capabilities() {
    let caps: RoleCapabilities = compute_role_capabilities(Role::Recrue);

    assert_eq!(caps.get(PermissionAction::CreateInvoice), Capability::Allowed);
    assert_eq!(caps.get(PermissionAction::ViewOwnStats), Capability::Allowed);
    assert_eq!(
        caps.get(PermissionAction::EditFidelityOperation),
        Capability::Denied
    );
    assert_eq!(caps.get(PermissionAction::ViewCandidatures), Capability::Denied);
    assert!(caps.assignable_roles.is_empty());
}

#[test]
fn test_chef_equipe_cannot_assign_roles() {
    let caps: RoleCapabilities = compute_role_capabilities(Role::ChefEquipe);

    assert!(!caps.get(PermissionAction::ManageUserRoles).is_allowed());
    assert!(caps.assignable_roles.is_empty());
}

#[test]
fn test_patron_capabilities() {
    let actor: AuthenticatedActor = AuthenticatedActor::new(String::from("boss"), Role::Patron);
    let caps: RoleCapabilities = compute_capabilities(&actor);

    assert!(caps.get(PermissionAction::ManagePay).is_allowed());
    assert!(!caps.get(PermissionAction::ResetData).is_allowed());
    assert!(!caps.get(PermissionAction::SubmitCandidature).is_allowed());
    assert_eq!(
        caps.assignable_roles,
        vec![
            Role::Client,
            Role::Recrue,
            Role::MecanoNovice,
            Role::Experimente,
            Role::ChefEquipe,
        ]
    );
}

#[test]
fn test_client_has_no_assignable_roles() {
    let caps: RoleCapabilities = compute_role_capabilities(Role::Client);
    assert!(caps.assignable_roles.is_empty());
    assert!(caps.get(PermissionAction::ViewOwnFidelity).is_allowed());
}

#[test]
fn test_capability_serializes_as_bool() {
    assert_eq!(serde_json::to_string(&Capability::Allowed).unwrap(), "true");
    assert_eq!(serde_json::to_string(&Capability::Denied).unwrap(), "false");
    let parsed: Capability = serde_json::from_str("false").unwrap();
    assert_eq!(parsed, Capability::Denied);
}
