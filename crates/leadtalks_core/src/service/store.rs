//! Session-level CRM coordinator.
//!
//! # Responsibility
//! - Own every entity collection of one session.
//! - Validate form input, apply repo operations and swap snapshots.
//! - Queue user-visible notices for the presentation layer.
//!
//! # Invariants
//! - A collection snapshot is replaced only when a mutation is applied;
//!   rejected input and no-ops keep the previous `Arc` identity.
//! - Deleting a lead removes its notes and keeps its calendar events.
//! - Linked event + note creation swaps both snapshots in one call.
//! - A stage referenced by any lead cannot be deleted.
//!
//! # See also
//! - `service::lead_flow` for the lead-detail wizard driving linked creation.

use crate::clock::{new_token, Clock, SystemClock};
use crate::config::CoreConfig;
use crate::model::catalog::{parse_options, CustomField, FieldForm, FieldType, Tag, TagForm};
use crate::model::contact::{Contact, ContactForm};
use crate::model::event::{CalendarEvent, EventForm};
use crate::model::lead::{Lead, LeadDraft, LeadId};
use crate::model::note::{Note, NoteDraft, NoteKind};
use crate::model::stage::{Stage, StageForm, StageId};
use crate::model::task::{Task, TaskForm};
use crate::repo::catalog_repo::{delete_field, delete_tag, upsert_field, upsert_tag};
use crate::repo::collection::Collection;
use crate::repo::contact_repo::{create_contact, delete_contact, update_contact};
use crate::repo::event_repo::{delete_event, event_from_form, update_event};
use crate::repo::lead_repo::{create_lead, delete_lead, update_lead, UpsertOutcome};
use crate::repo::note_repo::{build_note, create_note, notes_for_lead};
use crate::repo::stage_repo::{
    create_stage, leads_in_stage, ordered_stages, stage_id_from_token, update_stage,
};
use crate::repo::task_repo::{create_task, delete_task, update_task, NewTask};
use crate::service::dashboard::DashboardSummary;
use crate::service::kanban::{apply_drag, board, move_message, DragEnd, DragOutcome, StageColumn};
use crate::view::filter::TextFilter;
use chrono::NaiveDate;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Label shown for a stage id that no longer resolves.
pub const UNKNOWN_STAGE_LABEL: &str = "Etapa desconhecida";

/// Form field that must be filled before a save is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    LeadName,
    NoteText,
    TaskDescription,
    TaskDueDate,
    EventTitle,
    EventDate,
    StageLabel,
    TagName,
    FieldName,
}

impl RequiredField {
    fn wire_name(self) -> &'static str {
        match self {
            Self::LeadName => "nomeLead",
            Self::NoteText => "texto",
            Self::TaskDescription => "descricaoTarefa",
            Self::TaskDueDate => "dataEntrega",
            Self::EventTitle => "titulo",
            Self::EventDate => "data",
            Self::StageLabel => "label",
            Self::TagName | Self::FieldName => "nome",
        }
    }

    fn message(self) -> &'static str {
        match self {
            Self::LeadName => "Nome do lead é obrigatório",
            Self::NoteText => "Texto da nota é obrigatório",
            Self::TaskDescription => "Descrição da tarefa é obrigatória",
            Self::TaskDueDate => "Data de entrega é obrigatória",
            Self::EventTitle => "Título do evento é obrigatório",
            Self::EventDate => "Data do evento é obrigatória",
            Self::StageLabel => "Nome da etapa é obrigatório",
            Self::TagName => "Nome da etiqueta é obrigatório",
            Self::FieldName => "Nome do campo é obrigatório",
        }
    }
}

/// Rejected store mutation. Every variant is recoverable by correcting input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    MissingField(RequiredField),
    /// Single-select field submitted without any option.
    MissingSelectOptions,
    /// Contact form with a blank name, phone or segment.
    IncompleteContact,
    StageInUse { stage_id: StageId, lead_count: usize },
}

impl StoreError {
    /// Portuguese warning shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingField(field) => field.message().to_string(),
            Self::MissingSelectOptions => {
                "Adicione pelo menos uma opção para campo de seleção".to_string()
            }
            Self::IncompleteContact => "Preencha todos os campos".to_string(),
            Self::StageInUse { lead_count, .. } => {
                format!("Etapa possui {lead_count} lead(s) e não pode ser excluída")
            }
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => {
                write!(f, "required field `{}` is blank", field.wire_name())
            }
            Self::MissingSelectOptions => write!(f, "select field requires at least one option"),
            Self::IncompleteContact => write!(f, "contact requires name, phone and segment"),
            Self::StageInUse {
                stage_id,
                lead_count,
            } => write!(
                f,
                "stage `{stage_id}` is referenced by {lead_count} lead(s)"
            ),
        }
    }
}

impl Error for StoreError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
}

/// User-visible confirmation or warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}

/// Initial collections of a store, in wire shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreData {
    pub leads: Vec<Lead>,
    #[serde(rename = "notas")]
    pub notes: Vec<Note>,
    #[serde(rename = "tarefas")]
    pub tasks: Vec<Task>,
    #[serde(rename = "eventos")]
    pub events: Vec<CalendarEvent>,
    #[serde(rename = "etapas")]
    pub stages: Vec<Stage>,
    #[serde(rename = "etiquetas")]
    pub tags: Vec<Tag>,
    #[serde(rename = "campos")]
    pub fields: Vec<CustomField>,
    #[serde(rename = "contatos")]
    pub contacts: Vec<Contact>,
}

/// Single owner of all collections for one session.
pub struct CrmStore<C: Clock = SystemClock> {
    config: CoreConfig,
    clock: C,
    leads: Collection<Lead>,
    notes: Collection<Note>,
    tasks: Collection<Task>,
    events: Collection<CalendarEvent>,
    stages: Collection<Stage>,
    tags: Collection<Tag>,
    fields: Collection<CustomField>,
    contacts: Collection<Contact>,
    notices: Vec<Notice>,
}

impl CrmStore<SystemClock> {
    /// Empty store reading the local wall clock.
    pub fn new(config: CoreConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> CrmStore<C> {
    pub fn with_clock(config: CoreConfig, clock: C) -> Self {
        Self::from_data(config, clock, StoreData::default())
    }

    pub fn from_data(config: CoreConfig, clock: C, data: StoreData) -> Self {
        info!(
            "event=store_open module=store status=ok leads={} stages={} tasks={} events={}",
            data.leads.len(),
            data.stages.len(),
            data.tasks.len(),
            data.events.len()
        );
        Self {
            config,
            clock,
            leads: data.leads.into(),
            notes: data.notes.into(),
            tasks: data.tasks.into(),
            events: data.events.into(),
            stages: data.stages.into(),
            tags: data.tags.into(),
            fields: data.fields.into(),
            contacts: data.contacts.into(),
            notices: Vec::new(),
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn leads(&self) -> &Collection<Lead> {
        &self.leads
    }

    pub fn notes(&self) -> &Collection<Note> {
        &self.notes
    }

    pub fn tasks(&self) -> &Collection<Task> {
        &self.tasks
    }

    pub fn events(&self) -> &Collection<CalendarEvent> {
        &self.events
    }

    pub fn stages(&self) -> &Collection<Stage> {
        &self.stages
    }

    pub fn tags(&self) -> &Collection<Tag> {
        &self.tags
    }

    pub fn custom_fields(&self) -> &Collection<CustomField> {
        &self.fields
    }

    pub fn contacts(&self) -> &Collection<Contact> {
        &self.contacts
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Hands queued notices to the caller, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // ----- leads -------------------------------------------------------

    /// Blank lead seeded with `stage_id`. Not inserted until saved.
    pub fn new_lead(&self, stage_id: &str) -> Lead {
        create_lead(
            LeadDraft::in_stage(stage_id),
            new_token(),
            self.clock.now(),
        )
    }

    /// Saves a new or edited lead (upsert by id).
    pub fn save_lead(&mut self, lead: Lead) -> Result<UpsertOutcome, StoreError> {
        if !lead.has_name() {
            return self.reject(StoreError::MissingField(RequiredField::LeadName));
        }

        let lead_id = lead.id.clone();
        let (leads, outcome) = update_lead(&self.leads, lead, self.clock.now());
        self.leads = leads;
        info!(
            "event=lead_save module=store status=ok lead_id={} outcome={:?}",
            lead_id, outcome
        );
        Ok(outcome)
    }

    /// Deletes a lead and its notes. Returns the number of removed notes.
    pub fn delete_lead(&mut self, lead_id: &str) -> usize {
        if !self.leads.contains_id(lead_id) {
            warn!(
                "event=lead_delete module=store status=warn reason=unknown_lead lead_id={}",
                lead_id
            );
            return 0;
        }

        let deletion = delete_lead(&self.leads, &self.notes, lead_id);
        self.leads = deletion.leads;
        if deletion.removed_notes > 0 {
            self.notes = deletion.notes;
        }
        info!(
            "event=lead_delete module=store status=ok lead_id={} removed_notes={}",
            lead_id, deletion.removed_notes
        );
        deletion.removed_notes
    }

    /// Replaces the whole lead snapshot (`onUpdateLeads`).
    pub fn replace_leads(&mut self, leads: Collection<Lead>) {
        self.leads = leads;
    }

    /// Applies a board drag. Returns whether a lead moved.
    pub fn apply_drag(&mut self, drag: &DragEnd) -> bool {
        match apply_drag(&self.leads, &self.stages, drag) {
            DragOutcome::Unchanged => false,
            DragOutcome::Moved { leads, stage_label } => {
                self.replace_leads(leads);
                info!(
                    "event=lead_move module=store status=ok lead_id={} stage_id={}",
                    drag.lead_id,
                    drag.destination
                        .as_ref()
                        .map(|location| location.stage_id.as_str())
                        .unwrap_or_default()
                );
                self.notices.push(Notice::success(move_message(&stage_label)));
                true
            }
        }
    }

    /// Board columns for the current search query.
    pub fn board(&self, filter: &TextFilter) -> Vec<StageColumn<'_>> {
        board(&self.leads, &self.stages, filter)
    }

    // ----- notes -------------------------------------------------------

    /// Appends a manual note to a lead's history.
    pub fn add_note(&mut self, lead_id: &str, text: &str) -> Result<Note, StoreError> {
        if text.trim().is_empty() {
            return self.reject(StoreError::MissingField(RequiredField::NoteText));
        }

        let draft = NoteDraft {
            lead_id: lead_id.to_string(),
            text: text.to_string(),
            author: self.config.author.clone(),
            kind: NoteKind::Note,
            calendar_event_id: None,
        };
        let (notes, note) = create_note(&self.notes, draft, new_token(), self.clock.now());
        self.notes = notes;
        info!(
            "event=note_add module=store status=ok lead_id={} note_id={}",
            lead_id, note.id
        );
        Ok(note)
    }

    /// History of one lead in insertion order.
    pub fn notes_for(&self, lead_id: &str) -> Vec<&Note> {
        notes_for_lead(&self.notes, lead_id)
    }

    // ----- tasks -------------------------------------------------------

    /// Creates or edits a task.
    ///
    /// Returns `Ok(None)` when the form names a task id that does not exist.
    pub fn save_task(&mut self, form: TaskForm) -> Result<Option<Task>, StoreError> {
        if form.description.trim().is_empty() {
            return self.reject(StoreError::MissingField(RequiredField::TaskDescription));
        }
        let Some(due_date) = form.due_date else {
            return self.reject(StoreError::MissingField(RequiredField::TaskDueDate));
        };

        let lead_name = self.lead_name_snapshot(&form.lead_id).unwrap_or_default();
        let now = self.clock.now();

        match form.id.as_deref() {
            Some(task_id) => {
                let Some(existing) = self.tasks.get(task_id) else {
                    warn!(
                        "event=task_update module=store status=warn reason=unknown_task task_id={}",
                        task_id
                    );
                    return Ok(None);
                };
                let edited = Task {
                    lead_id: form.lead_id,
                    lead_name,
                    description: form.description,
                    due_date,
                    status: form.status,
                    priority: form.priority,
                    ..existing.clone()
                };
                let (tasks, saved) = update_task(&self.tasks, edited, now);
                self.tasks = tasks;
                info!(
                    "event=task_update module=store status=ok task_id={}",
                    task_id
                );
                Ok(saved)
            }
            None => {
                let input = NewTask {
                    lead_id: form.lead_id,
                    lead_name,
                    description: form.description,
                    due_date,
                    status: form.status,
                    priority: form.priority,
                    created_by: self.config.author.clone(),
                };
                let (tasks, task) = create_task(&self.tasks, input, new_token(), now);
                self.tasks = tasks;
                info!(
                    "event=task_create module=store status=ok task_id={}",
                    task.id
                );
                Ok(Some(task))
            }
        }
    }

    pub fn delete_task(&mut self, task_id: &str) -> bool {
        if !self.tasks.contains_id(task_id) {
            return false;
        }
        self.tasks = delete_task(&self.tasks, task_id);
        info!(
            "event=task_delete module=store status=ok task_id={}",
            task_id
        );
        true
    }

    // ----- calendar ----------------------------------------------------

    /// Creates or edits a calendar event (upsert by id).
    pub fn save_event(&mut self, form: EventForm) -> Result<CalendarEvent, StoreError> {
        let date = self.validate_event(&form)?;
        let lead_name = form
            .lead_id
            .as_deref()
            .and_then(|lead_id| self.lead_name_snapshot(lead_id));
        let id = form.id.clone().unwrap_or_else(new_token);
        let event = event_from_form(&form, id.clone(), date, lead_name, self.clock.now());

        let (events, outcome) = update_event(&self.events, event.clone());
        let saved = events.get(&id).cloned().unwrap_or(event);
        self.events = events;

        let message = match outcome {
            UpsertOutcome::Created => "Evento criado com sucesso!",
            UpsertOutcome::Updated => "Evento atualizado com sucesso!",
        };
        self.notices.push(Notice::success(message));
        info!(
            "event=event_save module=store status=ok event_id={} outcome={:?}",
            saved.id, outcome
        );
        Ok(saved)
    }

    /// Deletes a calendar event. Linked notes are kept.
    pub fn delete_event(&mut self, event_id: &str) -> bool {
        if !self.events.contains_id(event_id) {
            return false;
        }
        self.events = delete_event(&self.events, event_id);
        self.notices
            .push(Notice::success("Evento excluído com sucesso!"));
        info!(
            "event=event_delete module=store status=ok event_id={}",
            event_id
        );
        true
    }

    /// Creates a lead-linked event and its companion note in one swap.
    ///
    /// `lead_name` is the snapshot taken when the draft was opened.
    pub(crate) fn commit_linked_event(
        &mut self,
        form: &EventForm,
        lead_id: &LeadId,
        lead_name: Option<String>,
    ) -> Result<(CalendarEvent, Note), StoreError> {
        let date = self.validate_event(form)?;
        let now = self.clock.now();

        let linked = EventForm {
            id: None,
            lead_id: Some(lead_id.clone()),
            ..form.clone()
        };
        let event = event_from_form(&linked, new_token(), date, lead_name, now);
        let note = build_note(
            NoteDraft {
                lead_id: lead_id.clone(),
                text: format!("{}: {}", event.kind.label(), event.title),
                author: self.config.author.clone(),
                kind: event.kind.note_kind(),
                calendar_event_id: Some(event.id.clone()),
            },
            new_token(),
            now,
        );

        let (events, _) = update_event(&self.events, event.clone());
        let notes = self.notes.append(note.clone());
        self.events = events;
        self.notes = notes;

        self.notices
            .push(Notice::success("Evento criado com sucesso!"));
        info!(
            "event=linked_event_create module=store status=ok lead_id={} event_id={} note_id={}",
            lead_id, event.id, note.id
        );
        Ok((event, note))
    }

    fn validate_event(&mut self, form: &EventForm) -> Result<NaiveDate, StoreError> {
        if form.title.trim().is_empty() {
            return self.reject(StoreError::MissingField(RequiredField::EventTitle));
        }
        match form.date {
            Some(date) => Ok(date),
            None => self.reject(StoreError::MissingField(RequiredField::EventDate)),
        }
    }

    // ----- stages ------------------------------------------------------

    /// Creates (`id = None` or unknown id) or edits a stage.
    pub fn save_stage(&mut self, form: StageForm) -> Result<Stage, StoreError> {
        let label = form.label.trim();
        if label.is_empty() {
            return self.reject(StoreError::MissingField(RequiredField::StageLabel));
        }

        if let Some((stages, stage)) = form
            .id
            .as_deref()
            .and_then(|id| update_stage(&self.stages, id, label.to_string(), form.color))
        {
            self.stages = stages;
            info!(
                "event=stage_update module=store status=ok stage_id={}",
                stage.id
            );
            return Ok(stage);
        }

        let id = form
            .id
            .clone()
            .unwrap_or_else(|| stage_id_from_token(&new_token()));
        let (stages, stage) = create_stage(&self.stages, id, label.to_string(), form.color);
        self.stages = stages;
        info!(
            "event=stage_create module=store status=ok stage_id={} order={}",
            stage.id, stage.order
        );
        Ok(stage)
    }

    /// Deletes an unreferenced stage. Unknown ids are a no-op (`Ok(false)`).
    pub fn delete_stage(&mut self, stage_id: &str) -> Result<bool, StoreError> {
        if !self.stages.contains_id(stage_id) {
            return Ok(false);
        }
        let lead_count = leads_in_stage(&self.leads, stage_id);
        if lead_count > 0 {
            return self.reject(StoreError::StageInUse {
                stage_id: stage_id.to_string(),
                lead_count,
            });
        }
        self.stages = self.stages.remove(stage_id);
        info!(
            "event=stage_delete module=store status=ok stage_id={}",
            stage_id
        );
        Ok(true)
    }

    /// Label of `stage_id`, or `UNKNOWN_STAGE_LABEL` when it does not resolve.
    pub fn stage_label(&self, stage_id: &str) -> &str {
        self.stages
            .get(stage_id)
            .map(|stage| stage.label.as_str())
            .unwrap_or(UNKNOWN_STAGE_LABEL)
    }

    pub fn ordered_stages(&self) -> Vec<&Stage> {
        ordered_stages(&self.stages)
    }

    /// Leads whose stage id does not resolve; they appear on no board column.
    pub fn orphaned_leads(&self) -> Vec<&Lead> {
        self.leads
            .iter()
            .filter(|lead| !self.stages.contains_id(&lead.stage_id))
            .collect()
    }

    // ----- tags and custom fields --------------------------------------

    pub fn save_tag(&mut self, form: TagForm) -> Result<Tag, StoreError> {
        let name = form.name.trim();
        if name.is_empty() {
            return self.reject(StoreError::MissingField(RequiredField::TagName));
        }
        let tag = Tag {
            id: form.id.unwrap_or_else(new_token),
            name: name.to_string(),
            color: form.color,
        };
        let (tags, outcome) = upsert_tag(&self.tags, tag.clone());
        self.tags = tags;
        info!(
            "event=tag_save module=store status=ok tag_id={} outcome={:?}",
            tag.id, outcome
        );
        Ok(tag)
    }

    /// Deletes a tag definition and strips it from every lead.
    pub fn delete_tag(&mut self, tag_id: &str) -> bool {
        if !self.tags.contains_id(tag_id) {
            return false;
        }
        let (tags, leads) = delete_tag(&self.tags, &self.leads, tag_id);
        self.tags = tags;
        self.leads = leads;
        info!("event=tag_delete module=store status=ok tag_id={}", tag_id);
        true
    }

    pub fn save_field(&mut self, form: FieldForm) -> Result<CustomField, StoreError> {
        let name = form.name.trim();
        if name.is_empty() {
            return self.reject(StoreError::MissingField(RequiredField::FieldName));
        }
        let options = if form.field_type == FieldType::SingleSelect {
            let options = parse_options(&form.options_text);
            if options.is_empty() {
                return self.reject(StoreError::MissingSelectOptions);
            }
            options
        } else {
            Vec::new()
        };

        let field = CustomField {
            id: form.id.unwrap_or_else(new_token),
            name: name.to_string(),
            field_type: form.field_type,
            options,
        };
        let (fields, outcome) = upsert_field(&self.fields, field.clone());
        self.fields = fields;
        info!(
            "event=field_save module=store status=ok field_id={} outcome={:?}",
            field.id, outcome
        );
        Ok(field)
    }

    /// Deletes a field definition and every value stored for it.
    pub fn delete_field(&mut self, field_id: &str) -> bool {
        if !self.fields.contains_id(field_id) {
            return false;
        }
        let (fields, leads) = delete_field(&self.fields, &self.leads, field_id);
        self.fields = fields;
        self.leads = leads;
        info!(
            "event=field_delete module=store status=ok field_id={}",
            field_id
        );
        true
    }

    // ----- contacts ----------------------------------------------------

    pub fn save_contact(&mut self, form: ContactForm) -> Result<Contact, StoreError> {
        if [&form.name, &form.phone, &form.segment]
            .iter()
            .any(|value| value.trim().is_empty())
        {
            return self.reject(StoreError::IncompleteContact);
        }

        let now = self.clock.now();
        let updated = form
            .id
            .as_deref()
            .and_then(|id| update_contact(&self.contacts, id, &form, now));

        let (contacts, contact, message) = match updated {
            Some((contacts, contact)) => (contacts, contact, "Contato atualizado com sucesso"),
            None => {
                let (contacts, contact) = create_contact(&self.contacts, &form, new_token(), now);
                (contacts, contact, "Contato criado com sucesso")
            }
        };
        self.contacts = contacts;
        self.notices.push(Notice::success(message));
        info!(
            "event=contact_save module=store status=ok contact_id={}",
            contact.id
        );
        Ok(contact)
    }

    pub fn delete_contact(&mut self, contact_id: &str) -> bool {
        if !self.contacts.contains_id(contact_id) {
            return false;
        }
        self.contacts = delete_contact(&self.contacts, contact_id);
        self.notices
            .push(Notice::success("Contato excluído com sucesso"));
        info!(
            "event=contact_delete module=store status=ok contact_id={}",
            contact_id
        );
        true
    }

    // ----- derived views -----------------------------------------------

    pub fn dashboard(&self) -> DashboardSummary {
        DashboardSummary::compute(&self.leads, &self.tasks)
    }

    /// Current name of `lead_id`, copied for denormalized snapshots.
    pub fn lead_name_snapshot(&self, lead_id: &str) -> Option<String> {
        self.leads.get(lead_id).map(|lead| lead.name.clone())
    }

    fn reject<T>(&mut self, error: StoreError) -> Result<T, StoreError> {
        warn!(
            "event=store_reject module=store status=warn reason={}",
            error
        );
        self.notices.push(Notice::warning(error.user_message()));
        Err(error)
    }
}
