use std::collections::{HashMap, HashSet};

use common::jobs::AutoRefresh;
use common::model::project::{Project, ProjectStatusSnapshot};
use common::requests::ProjectRequest;
use gloo_timers::callback::Interval;
use yew::NodeRef;

pub struct ProjectList {
    pub projects: Vec<Project>,
    pub loading: bool,
    pub error: Option<String>,
    /// Last status snapshot per project id.
    pub statuses: HashMap<String, ProjectStatusSnapshot>,
    /// Projects with a run request in flight.
    pub running: HashSet<String>,
    pub auto_refresh: AutoRefresh<Interval>,

    pub dialog_ref: NodeRef,
    pub form: ProjectRequest,
    /// `Some(id)` while editing, `None` while creating.
    pub editing: Option<String>,
    pub form_error: Option<String>,
    pub saving: bool,
}

impl ProjectList {
    pub fn new() -> Self {
        Self {
            projects: Vec::new(),
            loading: true,
            error: None,
            statuses: HashMap::new(),
            running: HashSet::new(),
            auto_refresh: AutoRefresh::new(),
            dialog_ref: NodeRef::default(),
            form: ProjectRequest::default(),
            editing: None,
            form_error: None,
            saving: false,
        }
    }
}
