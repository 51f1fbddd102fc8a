//! Tests for the derivation state machine.

use super::*;
use crate::derive::HashMethod;

fn form(password: &str, domain: &str) -> FormInput {
    FormInput {
        password: password.into(),
        domain: domain.into(),
        length: "10".into(),
        ..FormInput::default()
    }
}

fn derive_action(actions: &[Action]) -> Option<(RequestId, &DerivationInput)> {
    actions.iter().find_map(|a| match a {
        Action::Derive { request_id, input } => Some((*request_id, input)),
        _ => None,
    })
}

fn started(orchestrator: &mut Orchestrator, f: &FormInput) -> RequestId {
    let actions = orchestrator.generate(f);
    derive_action(&actions).expect("derive dispatched").0
}

#[test]
fn empty_domain_stays_idle_without_backend() {
    let mut orchestrator = Orchestrator::default();
    let actions = orchestrator.generate(&form("master", ""));

    assert_eq!(orchestrator.phase(), Phase::Idle);
    assert!(derive_action(&actions).is_none());
    assert!(actions.contains(&Action::Ui(UiCommand::FlagMissing(Field::Domain))));
    assert!(!actions.contains(&Action::Ui(UiCommand::FlagMissing(Field::Password))));
}

#[test]
fn missing_password_flags_field() {
    let mut orchestrator = Orchestrator::default();
    let actions = orchestrator.generate(&form("", "example.com"));

    assert_eq!(orchestrator.phase(), Phase::Idle);
    assert!(derive_action(&actions).is_none());
    assert!(actions.contains(&Action::Ui(UiCommand::FlagMissing(Field::Password))));
}

#[test]
fn unparsable_domain_counts_as_missing() {
    let mut orchestrator = Orchestrator::default();
    let actions = orchestrator.generate(&form("master", "file:///etc"));
    assert!(derive_action(&actions).is_none());
    assert!(actions.contains(&Action::Ui(UiCommand::FlagMissing(Field::Domain))));
}

#[test]
fn generate_validates_and_dispatches() {
    let mut orchestrator = Orchestrator::default();
    let f = FormInput {
        password: "master".into(),
        secret: "pepper".into(),
        domain: "https://Login.Example.co.uk/path".into(),
        length: "99".into(),
        method: "sha512".into(),
        cost: String::new(),
        counter: "3".into(),
        disable_tld: false,
    };
    let actions = orchestrator.generate(&f);

    assert!(actions.contains(&Action::Ui(UiCommand::SetDomain("example.co.uk".into()))));
    assert!(actions.contains(&Action::Ui(UiCommand::SetLength(24))));
    let (request_id, input) = derive_action(&actions).unwrap();
    assert_eq!(orchestrator.phase(), Phase::Deriving { request_id });
    assert_eq!(input.domain, "example.co.uk");
    assert_eq!(input.password, "master3");
    assert_eq!(input.secret, "pepper");
    assert_eq!(input.length, 24);
    assert_eq!(input.method, HashMethod::Sha512);
    assert_eq!(input.cost_factor, DEFAULT_COST);
}

#[test]
fn disable_tld_keeps_subdomains() {
    let mut orchestrator = Orchestrator::default();
    let mut f = form("master", "login.example.com");
    f.disable_tld = true;
    let actions = orchestrator.generate(&f);
    assert_eq!(derive_action(&actions).unwrap().1.domain, "login.example.com");
}

#[test]
fn async_progress_then_single_reveal() {
    let mut orchestrator = Orchestrator::default();
    let mut f = form("master", "example.com");
    f.method = "bcrypt".into();
    let id = started(&mut orchestrator, &f);

    assert_eq!(
        orchestrator.progress(id, 0.25),
        vec![Action::Ui(UiCommand::ShowProgress("****".into()))]
    );
    assert_eq!(
        orchestrator.progress(id, 0.5),
        vec![Action::Ui(UiCommand::ShowProgress("********".into()))]
    );

    let actions = orchestrator.complete(id, "abcd1234".into());
    assert_eq!(orchestrator.phase(), Phase::Revealed { masked: true });
    let saves = actions
        .iter()
        .filter(|a| matches!(a, Action::SaveConfig { .. }))
        .count();
    assert_eq!(saves, 1);
    assert!(matches!(&actions[0], Action::SaveConfig { domain, .. } if domain == "example.com"));
    assert_eq!(actions[1], Action::NotifyResult("abcd1234".into()));
    assert_eq!(
        actions[2],
        Action::Ui(UiCommand::Reveal {
            password: "abcd1234".into()
        })
    );

    // Exactly one terminal event per request.
    assert!(orchestrator.complete(id, "again".into()).is_empty());
    assert!(orchestrator.progress(id, 0.9).is_empty());
    assert_eq!(orchestrator.phase(), Phase::Revealed { masked: true });
}

#[test]
fn progress_mask_never_shrinks_and_is_clamped() {
    let mut orchestrator = Orchestrator::new(8);
    let id = started(&mut orchestrator, &form("master", "example.com"));
    orchestrator.progress(id, 0.5);
    assert_eq!(
        orchestrator.progress(id, 0.25),
        vec![Action::Ui(UiCommand::ShowProgress("****".into()))]
    );
    assert_eq!(
        orchestrator.progress(id, 7.0),
        vec![Action::Ui(UiCommand::ShowProgress("********".into()))]
    );
    assert_eq!(
        orchestrator.progress(id, f64::NAN),
        vec![Action::Ui(UiCommand::ShowProgress("********".into()))]
    );
}

#[test]
fn edit_while_revealed_clears_output() {
    for password in ["abcd1234", "", "Zz9"] {
        let mut orchestrator = Orchestrator::default();
        let id = started(&mut orchestrator, &form("master", "example.com"));
        orchestrator.complete(id, password.into());

        let actions = orchestrator.input_changed(Field::Password);
        assert_eq!(orchestrator.phase(), Phase::Idle);
        assert!(actions.contains(&Action::Ui(UiCommand::ClearResult)));
    }
}

#[test]
fn stale_completion_after_edit_is_discarded() {
    let mut orchestrator = Orchestrator::default();
    let id = started(&mut orchestrator, &form("master", "example.com"));

    orchestrator.input_changed(Field::Domain);
    assert!(orchestrator.progress(id, 0.5).is_empty());
    assert!(orchestrator.complete(id, "late".into()).is_empty());
    assert_eq!(orchestrator.phase(), Phase::Idle);
}

#[test]
fn stale_completion_does_not_hijack_newer_request() {
    let mut orchestrator = Orchestrator::default();
    let first = started(&mut orchestrator, &form("master", "example.com"));
    orchestrator.input_changed(Field::Password);
    let second = started(&mut orchestrator, &form("other", "example.com"));
    assert!(second > first);

    assert!(orchestrator.complete(first, "old".into()).is_empty());
    assert_eq!(orchestrator.phase(), Phase::Deriving { request_id: second });
    assert_eq!(orchestrator.complete(second, "new".into()).len(), 3);
}

#[test]
fn generate_is_ignored_while_deriving() {
    let mut orchestrator = Orchestrator::default();
    let id = started(&mut orchestrator, &form("master", "example.com"));
    assert!(orchestrator.generate(&form("master", "example.com")).is_empty());
    assert_eq!(orchestrator.phase(), Phase::Deriving { request_id: id });
}

#[test]
fn generate_from_revealed_clears_first() {
    let mut orchestrator = Orchestrator::default();
    let id = started(&mut orchestrator, &form("master", "example.com"));
    orchestrator.complete(id, "abcd1234".into());

    let actions = orchestrator.generate(&form("master", "example.com"));
    assert_eq!(actions[0], Action::Ui(UiCommand::ClearResult));
    assert!(derive_action(&actions).is_some());
}

#[test]
fn failure_returns_to_idle() {
    let mut orchestrator = Orchestrator::default();
    let id = started(&mut orchestrator, &form("master", "example.com"));
    let actions = orchestrator.fail(id, &DeriveError::Worker("boom".into()));
    assert_eq!(orchestrator.phase(), Phase::Idle);
    assert_eq!(actions, vec![Action::Ui(UiCommand::ClearResult)]);
    assert!(orchestrator.complete(id, "late".into()).is_empty());
}

#[test]
fn mask_toggles_only_when_revealed() {
    let mut orchestrator = Orchestrator::default();
    assert!(orchestrator.toggle_mask().is_empty());

    let id = started(&mut orchestrator, &form("master", "example.com"));
    assert!(orchestrator.toggle_mask().is_empty());
    orchestrator.complete(id, "abcd1234".into());

    assert_eq!(
        orchestrator.toggle_mask(),
        vec![Action::Ui(UiCommand::SetMasked(false))]
    );
    assert_eq!(orchestrator.phase(), Phase::Revealed { masked: false });
    assert_eq!(
        orchestrator.toggle_mask(),
        vec![Action::Ui(UiCommand::SetMasked(true))]
    );
}

#[test]
fn alternate_domain_round_trip() {
    let mut orchestrator = Orchestrator::default();
    assert_eq!(orchestrator.toggle_alternate_domain("example.com"), None);

    let mut orchestrator = Orchestrator::default();
    orchestrator.generate(&form("master", "sub.example.com"));
    // Generated with subdomains removed; the alternate keeps them.
    assert_eq!(
        orchestrator.toggle_alternate_domain("example.com").as_deref(),
        Some("sub.example.com")
    );
    assert_eq!(
        orchestrator.toggle_alternate_domain("sub.example.com").as_deref(),
        Some("example.com")
    );
}
