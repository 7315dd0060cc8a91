// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use chrono::{DateTime, Utc};
use helpdesk_common_ticket::{
	build_predicate, build_update_predicate, normalize_optional, Assignable, Patch, Ticket,
	TicketIdentity, TicketPatch,
};
use helpdesk_server_auth::{Action, Actor, PermissionEvaluator};
use helpdesk_server_db::{DbError, TicketStore};
use tracing::{error, info, instrument, warn};

use crate::error::{Result, TicketError};
use crate::request::NewTicket;
use crate::sites::SiteRules;
use crate::validation;

pub struct TicketService {
	store: Arc<dyn TicketStore>,
	evaluator: Arc<PermissionEvaluator>,
	site_rules: SiteRules,
}

impl TicketService {
	pub fn new(
		store: Arc<dyn TicketStore>,
		evaluator: Arc<PermissionEvaluator>,
		site_rules: SiteRules,
	) -> Self {
		Self {
			store,
			evaluator,
			site_rules,
		}
	}

	pub fn evaluator(&self) -> &PermissionEvaluator {
		&self.evaluator
	}

	pub fn site_rules(&self) -> &SiteRules {
		&self.site_rules
	}

	pub async fn health_check(&self) -> Result<()> {
		self.store.health_check().await.map_err(store_failure)
	}

	#[instrument(
		skip(self, payload, actor),
		fields(actor = %actor.display_name, role = %actor.role_id)
	)]
	pub async fn create_ticket(&self, payload: NewTicket, actor: &Actor) -> Result<Ticket> {
		let mut ticket = validation::validate_new_ticket(payload, Utc::now())?;
		self.authorize(actor, None, &Action::Create)?;

		ticket.site = Some(
			self.site_rules
				.resolve(ticket.area.as_deref(), ticket.site.as_deref()),
		);
		if ticket.status.is_closed() && ticket.closed_at.is_none() {
			ticket.closed_at = Some(ticket.created_at);
		}

		let created = self.store.insert_one(&ticket).await.map_err(store_failure)?;
		info!(
			requester = %created.requester,
			category = %created.category,
			site = created.site.as_deref().unwrap_or(""),
			"ticket created"
		);
		Ok(created)
	}

	/// Applies `patch` to the ticket identified by `original`, as read at
	/// `original_created_at`.
	///
	/// Ownership is checked against `original`, not against the values the
	/// caller wants to write.
	#[instrument(
		skip(self, original, patch, actor),
		fields(actor = %actor.display_name, role = %actor.role_id, requester = %original.requester)
	)]
	pub async fn update_ticket(
		&self,
		original: &TicketIdentity,
		original_created_at: DateTime<Utc>,
		patch: TicketPatch,
		actor: &Actor,
	) -> Result<Ticket> {
		validation::validate_identity(original)?;
		let mut patch = validation::validate_patch(patch)?;

		self.authorize(actor, Some(original), &Action::Edit)?;
		if let Some(target) = agent_change(original, &patch) {
			self.authorize(actor, None, &Action::AssignAgent(target))?;
		}

		if let Patch::Set(area) = &patch.area {
			if let Some(site) = self.site_rules.forced_site(area) {
				patch.site = Patch::Set(site.to_string());
			}
		}
		if let Patch::Set(status) = patch.status {
			if patch.closed_at.is_keep() {
				patch.closed_at = if status.is_closed() {
					Patch::Set(Utc::now())
				} else {
					Patch::Clear
				};
			}
		}

		let predicate = build_update_predicate(original, original_created_at);
		match self.store.update_one(&predicate, &patch).await {
			Ok(Some(ticket)) => {
				info!(status = %ticket.status, "ticket updated");
				Ok(ticket)
			}
			Ok(None) => {
				warn!("ticket not found or already modified");
				Err(TicketError::NotFound)
			}
			Err(e) => Err(store_failure(e)),
		}
	}

	#[instrument(
		skip(self, identity, actor),
		fields(actor = %actor.display_name, role = %actor.role_id, requester = %identity.requester)
	)]
	pub async fn delete_ticket(&self, identity: &TicketIdentity, actor: &Actor) -> Result<Ticket> {
		validation::validate_identity(identity)?;
		self.authorize(actor, Some(identity), &Action::Delete)?;

		match self.store.delete_one(&build_predicate(identity)).await {
			Ok(Some(ticket)) => {
				info!("ticket deleted");
				Ok(ticket)
			}
			Ok(None) => {
				warn!("ticket not found or already modified");
				Err(TicketError::NotFound)
			}
			Err(e) => Err(store_failure(e)),
		}
	}

	/// All tickets the actor may see, newest first.
	#[instrument(skip(self, actor))]
	pub async fn list_visible_tickets(&self, actor: Option<&Actor>) -> Result<Vec<Ticket>> {
		let tickets = self.store.list_tickets().await.map_err(store_failure)?;
		Ok(self.evaluator.filter_visible(tickets, actor))
	}

	fn authorize(
		&self,
		actor: &Actor,
		resource: Option<&dyn Assignable>,
		action: &Action,
	) -> Result<()> {
		authorize(&self.evaluator, actor, resource, action)
	}
}

/// The new agent name when `patch` reassigns the ticket, `""` for unassigning.
fn agent_change(original: &TicketIdentity, patch: &TicketPatch) -> Option<String> {
	let current = normalize_optional(original.agent.as_deref());
	let next = match &patch.agent {
		Patch::Keep => return None,
		Patch::Clear => None,
		Patch::Set(agent) => normalize_optional(Some(agent.as_str())),
	};
	(current != next).then(|| next.unwrap_or_default())
}

/// Runs a permission check, logging denials.
pub(crate) fn authorize(
	evaluator: &PermissionEvaluator,
	actor: &Actor,
	resource: Option<&dyn Assignable>,
	action: &Action,
) -> Result<()> {
	let decision = evaluator.decide(actor, resource, action);
	if !decision.allowed {
		warn!(
			actor = %actor.display_name,
			role = %actor.role_id,
			action = %action,
			reason = decision.reason.as_deref().unwrap_or(""),
			"permission denied"
		);
	}
	decision.into_result().map_err(TicketError::from)
}

pub(crate) fn store_failure(e: DbError) -> TicketError {
	match &e {
		DbError::Conflict(msg) => error!(error = %msg, "ticket identity is ambiguous"),
		other => error!(error = %other, "record store failed"),
	}
	TicketError::from(e)
}

#[cfg(test)]
mod tests {
	use super::*;
	use helpdesk_common_ticket::TicketStatus;
	use helpdesk_server_db::testing::create_test_pool;
	use helpdesk_server_db::TicketRepository;

	struct Fixture {
		service: TicketService,
		repo: TicketRepository,
	}

	async fn fixture() -> Fixture {
		let repo = TicketRepository::new(create_test_pool().await.unwrap());
		let service = TicketService::new(
			Arc::new(repo.clone()),
			Arc::new(PermissionEvaluator::default()),
			SiteRules::default(),
		);
		Fixture { service, repo }
	}

	fn admin() -> Actor {
		Actor::new("Root Admin", "root@example.com", "admin")
	}

	fn jesus() -> Actor {
		Actor::new("Jesus Murrugarra", "jmurrugarra@example.com", "agent")
	}

	fn employee() -> Actor {
		Actor::new("Pedro Diaz", "pdiaz@example.com", "employee")
	}

	fn new_ticket(agent: Option<&str>) -> NewTicket {
		NewTicket {
			requester: "Maria Lopez".to_string(),
			request_text: "Outlook keeps crashing".to_string(),
			category: "Software".to_string(),
			agent: agent.map(str::to_string),
			area: Some("Finanzas".to_string()),
			status: Some(TicketStatus::Open),
			..Default::default()
		}
	}

	fn set_status(status: TicketStatus) -> TicketPatch {
		TicketPatch {
			status: Patch::Set(status),
			..Default::default()
		}
	}

	mod create {
		use super::*;

		#[tokio::test]
		async fn employee_can_create() {
			let f = fixture().await;
			let t = f.service.create_ticket(new_ticket(None), &employee()).await.unwrap();
			assert_eq!(t.site.as_deref(), Some("Surquillo"));
			assert_eq!(f.repo.list_tickets().await.unwrap(), vec![t]);
		}

		#[tokio::test]
		async fn status_defaults_to_closed_with_closure_time() {
			let f = fixture().await;
			let mut payload = new_ticket(None);
			payload.status = None;
			let t = f.service.create_ticket(payload, &employee()).await.unwrap();
			assert_eq!(t.status, TicketStatus::Closed);
			assert_eq!(t.closed_at, Some(t.created_at));
		}

		#[tokio::test]
		async fn forced_area_overrides_site() {
			let f = fixture().await;
			let mut payload = new_ticket(None);
			payload.area = Some("Almacén".to_string());
			payload.site = Some("Surquillo".to_string());
			let t = f.service.create_ticket(payload, &employee()).await.unwrap();
			assert_eq!(t.site.as_deref(), Some("Chorrillos"));
		}

		#[tokio::test]
		async fn validation_runs_before_authorization_and_store() {
			let f = fixture().await;
			let mut payload = new_ticket(None);
			payload.requester = " ".to_string();
			let err = f
				.service
				.create_ticket(payload, &Actor::new("Nobody", "", "garbage"))
				.await
				.unwrap_err();
			assert!(matches!(err, TicketError::Validation { ref field, .. } if field == "requester"));
			assert!(f.repo.list_tickets().await.unwrap().is_empty());
		}
	}

	mod update {
		use super::*;

		#[tokio::test]
		async fn employee_cannot_edit() {
			let f = fixture().await;
			let t = f.service.create_ticket(new_ticket(Some("Pedro Diaz")), &admin()).await.unwrap();
			let err = f
				.service
				.update_ticket(&t.identity(), t.created_at, set_status(TicketStatus::Closed), &employee())
				.await
				.unwrap_err();
			assert!(matches!(err, TicketError::Forbidden { .. }));
		}

		#[tokio::test]
		async fn agent_edits_own_ticket_case_insensitively() {
			let f = fixture().await;
			let t = f
				.service
				.create_ticket(new_ticket(Some("JESUS MURRUGARRA")), &admin())
				.await
				.unwrap();
			let updated = f
				.service
				.update_ticket(&t.identity(), t.created_at, set_status(TicketStatus::InProgress), &jesus())
				.await
				.unwrap();
			assert_eq!(updated.status, TicketStatus::InProgress);
			assert_eq!(updated.closed_at, None);
		}

		#[tokio::test]
		async fn ownership_is_judged_on_the_original_values() {
			let f = fixture().await;
			let t = f
				.service
				.create_ticket(new_ticket(Some("Luis Ramos")), &admin())
				.await
				.unwrap();
			let grab = TicketPatch {
				agent: Patch::Set("Jesus Murrugarra".to_string()),
				..Default::default()
			};
			let err = f
				.service
				.update_ticket(&t.identity(), t.created_at, grab, &jesus())
				.await
				.unwrap_err();
			assert!(matches!(err, TicketError::Forbidden { .. }));
		}

		#[tokio::test]
		async fn agent_cannot_hand_ticket_to_someone_else() {
			let f = fixture().await;
			let t = f
				.service
				.create_ticket(new_ticket(Some("Jesus Murrugarra")), &admin())
				.await
				.unwrap();
			let handoff = TicketPatch {
				agent: Patch::Set("Luis Ramos".to_string()),
				..Default::default()
			};
			let err = f
				.service
				.update_ticket(&t.identity(), t.created_at, handoff, &jesus())
				.await
				.unwrap_err();
			match err {
				TicketError::Forbidden { reason } => {
					assert_eq!(reason, "agents can only assign tickets to themselves")
				}
				other => panic!("unexpected {other:?}"),
			}
		}

		#[tokio::test]
		async fn closing_sets_closed_at_and_reopening_clears_it() {
			let f = fixture().await;
			let t = f.service.create_ticket(new_ticket(None), &admin()).await.unwrap();

			let closed = f
				.service
				.update_ticket(&t.identity(), t.created_at, set_status(TicketStatus::Closed), &admin())
				.await
				.unwrap();
			assert!(closed.closed_at.is_some());

			let reopened = f
				.service
				.update_ticket(&closed.identity(), closed.created_at, set_status(TicketStatus::Open), &admin())
				.await
				.unwrap();
			assert_eq!(reopened.closed_at, None);
		}

		#[tokio::test]
		async fn concurrent_change_yields_not_found() {
			let f = fixture().await;
			let t = f
				.service
				.create_ticket(new_ticket(Some("Jesus Murrugarra")), &admin())
				.await
				.unwrap();
			let read = t.identity();

			f.service
				.update_ticket(
					&read,
					t.created_at,
					TicketPatch {
						category: Patch::Set("Hardware".to_string()),
						..Default::default()
					},
					&admin(),
				)
				.await
				.unwrap();

			let err = f
				.service
				.update_ticket(&read, t.created_at, set_status(TicketStatus::Closed), &jesus())
				.await
				.unwrap_err();
			assert!(matches!(err, TicketError::NotFound));
			assert_eq!(f.repo.list_tickets().await.unwrap()[0].status, TicketStatus::Open);
		}

		#[tokio::test]
		async fn duplicate_rows_are_ambiguous() {
			let f = fixture().await;
			let t = f.service.create_ticket(new_ticket(None), &admin()).await.unwrap();
			f.repo.insert_one(&t).await.unwrap();

			let err = f
				.service
				.update_ticket(&t.identity(), t.created_at, set_status(TicketStatus::Closed), &admin())
				.await
				.unwrap_err();
			assert!(matches!(err, TicketError::Ambiguous));
		}
	}

	mod delete {
		use super::*;

		#[tokio::test]
		async fn only_admin_deletes() {
			let f = fixture().await;
			let t = f
				.service
				.create_ticket(new_ticket(Some("Jesus Murrugarra")), &admin())
				.await
				.unwrap();
			let err = f.service.delete_ticket(&t.identity(), &jesus()).await.unwrap_err();
			assert!(matches!(err, TicketError::Forbidden { .. }));

			let deleted = f.service.delete_ticket(&t.identity(), &admin()).await.unwrap();
			assert_eq!(deleted, t);
		}

		#[tokio::test]
		async fn delete_after_reassignment_is_not_found() {
			let f = fixture().await;
			let t = f
				.service
				.create_ticket(new_ticket(Some("Jesus Murrugarra")), &admin())
				.await
				.unwrap();
			let read = t.identity();

			f.service
				.update_ticket(
					&read,
					t.created_at,
					TicketPatch {
						agent: Patch::Set("Luis Ramos".to_string()),
						..Default::default()
					},
					&admin(),
				)
				.await
				.unwrap();

			let err = f.service.delete_ticket(&read, &admin()).await.unwrap_err();
			assert!(matches!(err, TicketError::NotFound));
			assert_eq!(f.repo.list_tickets().await.unwrap().len(), 1);
		}
	}

	mod listing {
		use super::*;

		#[tokio::test]
		async fn agents_see_only_their_tickets() {
			let f = fixture().await;
			for agent in ["Jesus Murrugarra", "Luis Ramos", "jesus murrugarra"] {
				let mut payload = new_ticket(Some(agent));
				payload.request_text = format!("Request for {agent}");
				f.service.create_ticket(payload, &admin()).await.unwrap();
			}

			let mine = f.service.list_visible_tickets(Some(&jesus())).await.unwrap();
			assert_eq!(mine.len(), 2);
			let all = f.service.list_visible_tickets(Some(&admin())).await.unwrap();
			assert_eq!(all.len(), 3);
			assert!(f.service.list_visible_tickets(None).await.unwrap().is_empty());
		}
	}

	#[test]
	fn agent_change_detection() {
		let mut original = TicketIdentity {
			agent: Some("Ana Torres".to_string()),
			..Default::default()
		};
		let set = |v: &str| TicketPatch {
			agent: Patch::Set(v.to_string()),
			..Default::default()
		};
		assert_eq!(agent_change(&original, &TicketPatch::default()), None);
		assert_eq!(agent_change(&original, &set("Ana Torres")), None);
		assert_eq!(agent_change(&original, &set("Luis Ramos")), Some("Luis Ramos".to_string()));
		let clear = TicketPatch {
			agent: Patch::Clear,
			..Default::default()
		};
		assert_eq!(agent_change(&original, &clear), Some(String::new()));

		original.agent = Some(String::new());
		assert_eq!(agent_change(&original, &clear), None);
	}
}
