//! Mock implementation of the directory service for testing
//!
//! Holds a scriptable organization graph, paginates listings with a
//! configurable page size, records every `move_account` invocation, and
//! supports failure injection for outage and denial scenarios.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use orgforge_core::error::{BackendError, DirectoryError, DirectoryResult};
use orgforge_core::{Account, DirectoryService, OuNode, Page, ParentKind, ParentRef};

/// One recorded `move_account` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCall {
    pub account_id: String,
    pub source_parent_id: String,
    pub destination_parent_id: String,
}

#[derive(Default)]
struct State {
    roots: Vec<OuNode>,
    /// parent id -> child OUs, in insertion order
    children: HashMap<String, Vec<OuNode>>,
    accounts: Vec<Account>,
    /// account id -> current parent id
    account_parents: HashMap<String, String>,
    move_calls: Vec<MoveCall>,
    page_size: usize,
    outage: Option<String>,
    move_denial: Option<(String, String)>,
}

/// Mock directory service
///
/// Configure the graph before handing it to the code under test:
///
/// ```
/// use orgforge_test_utils::MockDirectoryService;
///
/// let directory = MockDirectoryService::new();
/// directory.add_root("r-root", "Root");
/// directory.add_ou("r-root", "ou-sandbox", "Sandbox");
/// directory.add_account("198610579545", "dev-account", "dev@example.com", "r-root");
/// ```
pub struct MockDirectoryService {
    state: Mutex<State>,
}

impl Default for MockDirectoryService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDirectoryService {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                page_size: 100,
                ..State::default()
            }),
        }
    }

    /// Shrink listing pages to exercise pagination handling
    pub fn set_page_size(&self, page_size: usize) {
        self.state.lock().unwrap().page_size = page_size.max(1);
    }

    pub fn add_root(&self, id: &str, name: &str) {
        self.state.lock().unwrap().roots.push(OuNode::new(id, name));
    }

    /// Add an OU under `parent_id`; sibling order is insertion order
    pub fn add_ou(&self, parent_id: &str, id: &str, name: &str) {
        let node = OuNode::new(id, name).with_parent(parent_id);
        self.state
            .lock()
            .unwrap()
            .children
            .entry(parent_id.to_string())
            .or_default()
            .push(node);
    }

    pub fn add_account(&self, id: &str, name: &str, email: &str, parent_id: &str) {
        let mut state = self.state.lock().unwrap();
        state.accounts.push(Account {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
        });
        state
            .account_parents
            .insert(id.to_string(), parent_id.to_string());
    }

    /// All `move_account` invocations recorded so far
    pub fn move_calls(&self) -> Vec<MoveCall> {
        self.state.lock().unwrap().move_calls.clone()
    }

    /// Fail every call with a transient unavailability error
    pub fn inject_outage(&self, message: &str) {
        self.state.lock().unwrap().outage = Some(message.to_string());
    }

    /// Deny `move_account` calls with the given backend code
    pub fn deny_moves(&self, code: &str, message: &str) {
        self.state.lock().unwrap().move_denial =
            Some((code.to_string(), message.to_string()));
    }

    fn check_outage(state: &State) -> DirectoryResult<()> {
        match &state.outage {
            Some(message) => Err(DirectoryError::Backend(BackendError::unavailable(
                "directory service",
                message.clone(),
            ))),
            None => Ok(()),
        }
    }

    fn paginate<T: Clone>(items: &[T], cursor: Option<&str>, page_size: usize) -> Page<T> {
        let offset: usize = cursor.and_then(|c| c.parse().ok()).unwrap_or(0);
        let end = (offset + page_size).min(items.len());
        let page_items = items[offset.min(items.len())..end].to_vec();

        if end < items.len() {
            Page::with_cursor(page_items, end.to_string())
        } else {
            Page::last(page_items)
        }
    }
}

#[async_trait]
impl DirectoryService for MockDirectoryService {
    async fn describe_account(&self, account_id: &str) -> DirectoryResult<Account> {
        let state = self.state.lock().unwrap();
        Self::check_outage(&state)?;

        state
            .accounts
            .iter()
            .find(|account| account.id == account_id)
            .cloned()
            .ok_or_else(|| DirectoryError::account_not_found(account_id))
    }

    async fn list_parents(&self, child_id: &str) -> DirectoryResult<Vec<ParentRef>> {
        let state = self.state.lock().unwrap();
        Self::check_outage(&state)?;

        match state.account_parents.get(child_id) {
            Some(parent_id) => {
                let kind = if state.roots.iter().any(|root| &root.id == parent_id) {
                    ParentKind::Root
                } else {
                    ParentKind::OrganizationalUnit
                };
                Ok(vec![ParentRef {
                    id: parent_id.clone(),
                    kind,
                }])
            }
            None => Ok(Vec::new()),
        }
    }

    async fn list_roots(&self) -> DirectoryResult<Vec<OuNode>> {
        let state = self.state.lock().unwrap();
        Self::check_outage(&state)?;
        Ok(state.roots.clone())
    }

    async fn list_ous_for_parent(
        &self,
        parent_id: &str,
        cursor: Option<&str>,
    ) -> DirectoryResult<Page<OuNode>> {
        let state = self.state.lock().unwrap();
        Self::check_outage(&state)?;

        let children = state
            .children
            .get(parent_id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        Ok(Self::paginate(children, cursor, state.page_size))
    }

    async fn list_accounts(&self, cursor: Option<&str>) -> DirectoryResult<Page<Account>> {
        let state = self.state.lock().unwrap();
        Self::check_outage(&state)?;
        Ok(Self::paginate(&state.accounts, cursor, state.page_size))
    }

    async fn move_account(
        &self,
        account_id: &str,
        source_parent_id: &str,
        destination_parent_id: &str,
    ) -> DirectoryResult<()> {
        let mut state = self.state.lock().unwrap();
        Self::check_outage(&state)?;

        state.move_calls.push(MoveCall {
            account_id: account_id.to_string(),
            source_parent_id: source_parent_id.to_string(),
            destination_parent_id: destination_parent_id.to_string(),
        });

        if let Some((code, message)) = &state.move_denial {
            return Err(DirectoryError::Backend(BackendError::api(
                "directory service",
                code.clone(),
                message.clone(),
            )));
        }

        state
            .account_parents
            .insert(account_id.to_string(), destination_parent_id.to_string());
        Ok(())
    }
}
