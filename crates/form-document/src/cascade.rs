//! Layout Selection Cascade
//!
//! app selected → module list loads → module selected → layout list loads
//! → layout selected → document loads.
//!
//! Every selection change hands out a `LoadTicket`. A response is applied only
//! while its ticket is current, so the latest request always wins and a slow,
//! superseded response can never overwrite fresher state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{de_id, de_opt_id};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default, alias = "title")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleInfo {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub app_id: Option<String>,
    #[serde(default, alias = "title")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutInfo {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub module_id: Option<String>,
    #[serde(default, alias = "title")]
    pub name: String,
}

/// Persistence key of one saved document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayoutKey {
    pub app_id: String,
    pub module_id: String,
    pub layout_id: String,
}

impl fmt::Display for LayoutKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.app_id, self.module_id, self.layout_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStage {
    Modules,
    Layouts,
    Document,
}

/// Identifies one in-flight load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    stage: LoadStage,
    generation: u64,
}

impl LoadTicket {
    pub fn stage(&self) -> LoadStage {
        self.stage
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutCascade {
    apps: Vec<AppInfo>,
    app_id: Option<String>,
    modules: Vec<ModuleInfo>,
    module_id: Option<String>,
    layouts: Vec<LayoutInfo>,
    layout_id: Option<String>,
    loading: Option<LoadStage>,
    generation: u64,
}

impl LayoutCascade {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apps(&self) -> &[AppInfo] {
        &self.apps
    }

    pub fn modules(&self) -> &[ModuleInfo] {
        &self.modules
    }

    pub fn layouts(&self) -> &[LayoutInfo] {
        &self.layouts
    }

    pub fn app_id(&self) -> Option<&str> {
        self.app_id.as_deref()
    }

    pub fn module_id(&self) -> Option<&str> {
        self.module_id.as_deref()
    }

    pub fn layout_id(&self) -> Option<&str> {
        self.layout_id.as_deref()
    }

    /// Stage currently waiting for a response
    pub fn loading(&self) -> Option<LoadStage> {
        self.loading
    }

    pub fn is_loading(&self, stage: LoadStage) -> bool {
        self.loading == Some(stage)
    }

    pub fn set_apps(&mut self, apps: Vec<AppInfo>) {
        self.apps = apps;
    }

    /// Select an app; clears modules and everything below.
    ///
    /// Returns the ticket for the module list load, or `None` when the
    /// selection was cleared.
    pub fn select_app(&mut self, app_id: Option<String>) -> Option<LoadTicket> {
        let app_id = app_id.filter(|id| !id.is_empty());
        self.app_id = app_id;
        self.modules.clear();
        self.reset_from_module();
        self.app_id.as_ref()?;
        Some(self.issue(LoadStage::Modules))
    }

    pub fn apply_modules(&mut self, ticket: LoadTicket, modules: Vec<ModuleInfo>) -> bool {
        if !self.accept(ticket, LoadStage::Modules) {
            return false;
        }
        self.modules = modules;
        true
    }

    /// Select a module; clears layouts and the layout selection.
    pub fn select_module(&mut self, module_id: Option<String>) -> Option<LoadTicket> {
        let module_id = module_id.filter(|id| !id.is_empty());
        self.reset_from_module();
        self.module_id = module_id;
        self.module_id.as_ref()?;
        Some(self.issue(LoadStage::Layouts))
    }

    /// Apply a layout list, keeping only rows of the selected module.
    ///
    /// Rows without a `module_id` are kept as the backend already filtered them.
    pub fn apply_layouts(&mut self, ticket: LoadTicket, layouts: Vec<LayoutInfo>) -> bool {
        if !self.accept(ticket, LoadStage::Layouts) {
            return false;
        }
        let module_id = self.module_id.clone();
        self.layouts = layouts
            .into_iter()
            .filter(|l| l.module_id.is_none() || l.module_id == module_id)
            .collect();
        true
    }

    /// Select a layout; the returned ticket guards the document load.
    ///
    /// Clearing the layout drops any document load still in flight.
    pub fn select_layout(&mut self, layout_id: Option<String>) -> Option<LoadTicket> {
        self.layout_id = layout_id.filter(|id| !id.is_empty());
        if self.layout_key().is_none() {
            self.invalidate();
            return None;
        }
        Some(self.issue(LoadStage::Document))
    }

    /// Whether a loaded document may replace the editor's document
    pub fn accept_document(&mut self, ticket: LoadTicket) -> bool {
        self.accept(ticket, LoadStage::Document)
    }

    /// Mark a failed load as finished (ignored for stale tickets)
    pub fn fail_load(&mut self, ticket: LoadTicket) {
        if self.is_current(ticket) {
            self.loading = None;
        }
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.generation == self.generation && self.loading == Some(ticket.stage)
    }

    pub fn layout_key(&self) -> Option<LayoutKey> {
        Some(LayoutKey {
            app_id: self.app_id.clone()?,
            module_id: self.module_id.clone()?,
            layout_id: self.layout_id.clone()?,
        })
    }

    fn reset_from_module(&mut self) {
        self.module_id = None;
        self.layouts.clear();
        self.layout_id = None;
        self.invalidate();
    }

    /// Pending loads for the old selection become stale
    fn invalidate(&mut self) {
        self.loading = None;
        self.generation += 1;
    }

    fn issue(&mut self, stage: LoadStage) -> LoadTicket {
        self.generation += 1;
        self.loading = Some(stage);
        LoadTicket {
            stage,
            generation: self.generation,
        }
    }

    fn accept(&mut self, ticket: LoadTicket, stage: LoadStage) -> bool {
        if ticket.stage != stage || !self.is_current(ticket) {
            tracing::debug!(?ticket, current = self.generation, "dropping stale {:?} response", stage);
            return false;
        }
        self.loading = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(id: &str) -> ModuleInfo {
        ModuleInfo {
            id: id.to_string(),
            app_id: Some("crm".to_string()),
            name: id.to_uppercase(),
        }
    }

    fn layout(id: &str, module_id: &str) -> LayoutInfo {
        LayoutInfo {
            id: id.to_string(),
            module_id: Some(module_id.to_string()),
            name: id.to_string(),
        }
    }

    fn selected_through_module() -> LayoutCascade {
        let mut cascade = LayoutCascade::new();
        let t = cascade.select_app(Some("crm".to_string())).unwrap();
        assert!(cascade.apply_modules(t, vec![module("bookings"), module("vehicles")]));
        let t = cascade.select_module(Some("bookings".to_string())).unwrap();
        assert!(cascade.apply_layouts(t, vec![layout("default", "bookings")]));
        cascade
    }

    #[test]
    fn test_full_cascade_yields_key() {
        let mut cascade = selected_through_module();
        let t = cascade.select_layout(Some("default".to_string())).unwrap();
        assert_eq!(t.stage(), LoadStage::Document);
        assert!(cascade.is_loading(LoadStage::Document));
        assert!(cascade.accept_document(t));
        assert_eq!(cascade.layout_key().unwrap().to_string(), "crm/bookings/default");
        assert_eq!(cascade.loading(), None);
    }

    #[test]
    fn test_upstream_change_resets_downstream() {
        let mut cascade = selected_through_module();
        cascade.select_layout(Some("default".to_string()));

        cascade.select_app(Some("shop".to_string()));
        assert_eq!(cascade.app_id(), Some("shop"));
        assert!(cascade.modules().is_empty());
        assert_eq!(cascade.module_id(), None);
        assert!(cascade.layouts().is_empty());
        assert_eq!(cascade.layout_id(), None);
        assert!(cascade.layout_key().is_none());
    }

    #[test]
    fn test_module_change_keeps_modules() {
        let mut cascade = selected_through_module();
        cascade.select_module(Some("vehicles".to_string()));
        assert_eq!(cascade.modules().len(), 2);
        assert!(cascade.layouts().is_empty());
        assert!(cascade.is_loading(LoadStage::Layouts));
    }

    #[test]
    fn test_latest_layout_request_wins() {
        let mut cascade = selected_through_module();
        let first = cascade.select_module(Some("bookings".to_string())).unwrap();
        let second = cascade.select_module(Some("vehicles".to_string())).unwrap();

        // the faster, newer response lands first
        assert!(cascade.apply_layouts(second, vec![layout("fleet", "vehicles")]));
        // the slower, superseded one must not overwrite it
        assert!(!cascade.apply_layouts(first, vec![layout("default", "bookings")]));
        assert_eq!(cascade.layouts()[0].id, "fleet");
    }

    #[test]
    fn test_stale_document_is_rejected() {
        let mut cascade = selected_through_module();
        let old = cascade.select_layout(Some("default".to_string())).unwrap();
        let new = cascade.select_layout(Some("compact".to_string())).unwrap();
        assert!(!cascade.accept_document(old));
        assert!(cascade.accept_document(new));
    }

    #[test]
    fn test_cleared_layout_drops_pending_document() {
        let mut cascade = selected_through_module();
        let pending = cascade.select_layout(Some("default".to_string())).unwrap();

        assert!(cascade.select_layout(None).is_none());
        assert_eq!(cascade.loading(), None);
        assert!(!cascade.accept_document(pending));
        assert!(cascade.layout_key().is_none());

        let pending = cascade.select_layout(Some("default".to_string())).unwrap();
        assert!(cascade.select_layout(Some(String::new())).is_none());
        assert!(!cascade.accept_document(pending));
    }

    #[test]
    fn test_ticket_stage_must_match() {
        let mut cascade = LayoutCascade::new();
        let t = cascade.select_app(Some("crm".to_string())).unwrap();
        assert!(!cascade.apply_layouts(t, vec![]));
        assert!(cascade.apply_modules(t, vec![]));
    }

    #[test]
    fn test_layouts_filtered_by_module() {
        let mut cascade = selected_through_module();
        let t = cascade.select_module(Some("bookings".to_string())).unwrap();
        let unscoped = LayoutInfo {
            id: "shared".to_string(),
            module_id: None,
            name: "Shared".to_string(),
        };
        cascade.apply_layouts(t, vec![layout("a", "bookings"), layout("b", "vehicles"), unscoped]);
        let ids: Vec<&str> = cascade.layouts().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "shared"]);
    }

    #[test]
    fn test_clearing_selection_issues_no_ticket() {
        let mut cascade = selected_through_module();
        assert!(cascade.select_module(Some(String::new())).is_none());
        assert_eq!(cascade.loading(), None);
        assert!(cascade.select_app(None).is_none());
        assert!(cascade.modules().is_empty());
    }

    #[test]
    fn test_failed_load_clears_loading() {
        let mut cascade = LayoutCascade::new();
        let t = cascade.select_app(Some("crm".to_string())).unwrap();
        cascade.fail_load(t);
        assert_eq!(cascade.loading(), None);
        assert!(!cascade.apply_modules(t, vec![module("late")]));
    }

    #[test]
    fn test_layout_info_parses_numeric_ids() {
        let json = r#"[{"id": 4, "module_id": 2, "name": "Default", "created_by": 1}]"#;
        let layouts: Vec<LayoutInfo> = serde_json::from_str(json).unwrap();
        assert_eq!(layouts[0].id, "4");
        assert_eq!(layouts[0].module_id.as_deref(), Some("2"));
    }
}
