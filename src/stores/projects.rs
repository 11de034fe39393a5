use rust_decimal::Decimal;
use std::path::{Path, PathBuf};

use super::{next_id, ChangeListener};
use crate::dto::{Account, Project, ProjectFields};
use crate::error::{Error, Result};
use crate::expenses::try_add_expense;
use crate::json_utils;
use crate::session::{EditSession, SessionMode};

/// Projects backed by one JSON file, plus at most one pending edit session.
pub struct ProjectsStore {
    path: PathBuf,
    projects: Vec<Project>,
    session: Option<EditSession>,
    listener: Option<ChangeListener>,
}

impl ProjectsStore {
    /// Loads the store from `path`, creating an empty file if there is none.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_owned();
        let projects: Vec<Project> = json_utils::load_or_create(&path)?;
        tracing::info!(path = %path.display(), count = projects.len(), "projects loaded");
        Ok(Self {
            path,
            projects,
            session: None,
            listener: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set_listener(&mut self, listener: impl FnMut() + Send + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn list(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    /// Sum of every project's expenses, in cents.
    pub fn total_expenses(&self) -> Decimal {
        let mut total: Decimal = self.projects.iter().map(|project| project.expenses).sum();
        total.rescale(2);
        total
    }

    /// Creates a project with the next free id, default status/type and
    /// zero expenses. Rejects a blank name without touching the store.
    pub fn add(&mut self, fields: ProjectFields) -> Result<Project> {
        let name = validated_name(&fields.name)?;
        let project = Project {
            id: next_id(self.projects.iter().map(|project| project.id))?,
            name,
            description: fields.description,
            start_date: fields.start_date,
            end_date: fields.end_date,
            status: fields.status,
            project_type: fields.project_type,
            expenses: Decimal::new(0, 2),
            accounts: fields.accounts,
        };
        self.projects.push(project.clone());
        if let Err(err) = self.persist() {
            self.projects.pop();
            return Err(err);
        }
        tracing::info!(id = project.id, name = %project.name, "project added");
        self.notify();
        Ok(project)
    }

    /// Replaces every editable field of project `id`; expenses are kept.
    pub fn update(&mut self, id: u32, fields: ProjectFields) -> Result<Project> {
        let name = validated_name(&fields.name)?;
        let index = self.position(id)?;
        let project = Project {
            id,
            name,
            description: fields.description,
            start_date: fields.start_date,
            end_date: fields.end_date,
            status: fields.status,
            project_type: fields.project_type,
            expenses: self.projects[index].expenses,
            accounts: fields.accounts,
        };
        self.replace_persisted(index, project.clone())?;
        tracing::info!(id, "project updated");
        self.notify();
        Ok(project)
    }

    /// Removes project `id`. Returns false (and writes nothing) if absent.
    pub fn delete(&mut self, id: u32) -> Result<bool> {
        let Some(index) = self.projects.iter().position(|project| project.id == id) else {
            tracing::debug!(id, "delete of unknown project ignored");
            return Ok(false);
        };
        let removed = self.projects.remove(index);
        if let Err(err) = self.persist() {
            self.projects.insert(index, removed);
            return Err(err);
        }
        if matches!(self.session_mode(), Some(SessionMode::Edit(edited)) if edited == id) {
            self.session = None;
        }
        tracing::info!(id, "project deleted");
        self.notify();
        Ok(true)
    }

    /// Adds a user-entered amount to project `id`'s expenses and returns
    /// the new total. Input that is not a positive number is rejected.
    pub fn record_expense(&mut self, id: u32, amount: &str) -> Result<Decimal> {
        let index = self.position(id)?;
        let total = match try_add_expense(self.projects[index].expenses, amount) {
            Ok(total) => total,
            Err(err) => {
                tracing::warn!(id, amount, "expense input ignored");
                return Err(err);
            }
        };
        let project = Project {
            expenses: total,
            ..self.projects[index].clone()
        };
        self.replace_persisted(index, project)?;
        tracing::info!(id, %total, "expense recorded");
        self.notify();
        Ok(total)
    }

    /// Starts a session for a new project, replacing any open session.
    pub fn open_add(&mut self) -> &mut EditSession {
        self.session.insert(EditSession::for_add())
    }

    /// Starts a session seeded from project `id`, replacing any open session.
    pub fn open_edit(&mut self, id: u32) -> Result<&mut EditSession> {
        let project = self.get(id).ok_or(Error::ProjectNotFound(id))?;
        let session = EditSession::for_edit(project);
        Ok(self.session.insert(session))
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut EditSession> {
        self.session.as_mut()
    }

    fn session_mode(&self) -> Option<SessionMode> {
        self.session.as_ref().map(EditSession::mode)
    }

    /// Commits the open session as an add or an update. `accounts` is the
    /// accounts store's current list, which the selection is resolved against.
    /// A rejected save leaves the session open for correction.
    pub fn save_session(&mut self, accounts: &[Account]) -> Result<Project> {
        let session = self.session.as_ref().ok_or(Error::NoActiveSession)?;
        let fields = session.to_fields(accounts);
        let saved = match session.mode() {
            SessionMode::Add => self.add(fields),
            SessionMode::Edit(id) => self.update(id, fields),
        };
        if saved.is_ok() {
            self.session = None;
        }
        saved
    }

    /// Drops the open session without writing anything.
    pub fn cancel_session(&mut self) {
        self.session = None;
    }

    fn position(&self, id: u32) -> Result<usize> {
        self.projects
            .iter()
            .position(|project| project.id == id)
            .ok_or(Error::ProjectNotFound(id))
    }

    /// Swaps in `project` at `index` and persists, restoring the old record
    /// if the write fails.
    fn replace_persisted(&mut self, index: usize, project: Project) -> Result<()> {
        let old = std::mem::replace(&mut self.projects[index], project);
        if let Err(err) = self.persist() {
            self.projects[index] = old;
            return Err(err);
        }
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        json_utils::save(&self.path, &self.projects)
    }

    fn notify(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener();
        }
    }
}

impl std::fmt::Debug for ProjectsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectsStore")
            .field("path", &self.path)
            .field("projects", &self.projects.len())
            .field("session", &self.session_mode())
            .finish()
    }
}

fn validated_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        tracing::warn!("project save rejected: empty name");
        return Err(Error::EmptyName);
    }
    Ok(name.to_string())
}
