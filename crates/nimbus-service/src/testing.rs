//! In-memory store doubles for service unit tests.
//!
//! `MemoryDrive` mirrors the repository semantics closely enough to
//! exercise the services: ownership scoping, trash state, cascading
//! folder deletes, and storage-key uniqueness. `MemoryObjects` records
//! every delete so tests can assert sequencing, and can be told to fail.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use nimbus_core::traits::ObjectStore;
use nimbus_core::types::{FileClass, FileQuery, FileSortKey, FolderQuery, FolderScope, FolderSortKey, SortDirection};
use nimbus_core::{AppError, AppResult};
use nimbus_database::repositories::{FileStore, FolderStore};
use nimbus_entity::file::{CreateFile, File, UpdateFile};
use nimbus_entity::folder::{CreateFolder, Folder, UpdateFolder};
use nimbus_entity::storage::StorageUsage;

#[derive(Debug, Default)]
struct DriveState {
    folders: HashMap<Uuid, Folder>,
    files: HashMap<Uuid, File>,
}

/// Shared in-memory backing store for folders and files.
#[derive(Debug, Default)]
pub struct MemoryDrive {
    state: Mutex<DriveState>,
}

impl MemoryDrive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a folder row directly, bypassing service validation.
    pub fn insert_folder(&self, folder: Folder) {
        let mut state = self.state.lock().unwrap();
        state.folders.insert(folder.id, folder);
    }

    /// Seed a file row directly, bypassing service validation.
    pub fn insert_file(&self, file: File) {
        let mut state = self.state.lock().unwrap();
        state.files.insert(file.id, file);
    }

    /// Point a folder at a new parent without any checks. Used to
    /// manufacture broken hierarchies.
    pub fn force_parent(&self, folder_id: Uuid, parent_id: Option<Uuid>) {
        let mut state = self.state.lock().unwrap();
        if let Some(folder) = state.folders.get_mut(&folder_id) {
            folder.parent_id = parent_id;
        }
    }

    pub fn folder_exists(&self, id: Uuid) -> bool {
        self.state.lock().unwrap().folders.contains_key(&id)
    }

    pub fn file_exists(&self, id: Uuid) -> bool {
        self.state.lock().unwrap().files.contains_key(&id)
    }

    /// Collect every folder ID reachable from `root` through parent
    /// links, root included.
    fn descendant_folders(state: &DriveState, root: Uuid) -> Vec<Uuid> {
        let mut out = vec![root];
        let mut cursor = 0;
        while cursor < out.len() {
            let current = out[cursor];
            cursor += 1;
            for folder in state.folders.values() {
                if folder.parent_id == Some(current) && !out.contains(&folder.id) {
                    out.push(folder.id);
                }
            }
        }
        out
    }
}

/// Build a folder row with fresh timestamps.
pub fn folder_row(name: &str, owner_id: Uuid, parent_id: Option<Uuid>) -> Folder {
    let now = Utc::now();
    Folder {
        id: Uuid::new_v4(),
        name: name.to_string(),
        owner_id,
        parent_id,
        created_at: now,
        updated_at: now,
    }
}

/// Build an active file row with fresh timestamps.
pub fn file_row(name: &str, owner_id: Uuid, folder_id: Option<Uuid>, mime_type: &str) -> File {
    let now = Utc::now();
    File {
        id: Uuid::new_v4(),
        name: name.to_string(),
        owner_id,
        folder_id,
        size: 1024,
        mime_type: mime_type.to_string(),
        storage_key: format!("{owner_id}/{}/{name}", Uuid::new_v4()),
        is_starred: false,
        is_trashed: false,
        trashed_at: None,
        created_at: now,
        updated_at: now,
    }
}

fn matches_class(mime_type: &str, class: FileClass) -> bool {
    match class {
        FileClass::All => true,
        FileClass::Other => FileClass::classify(mime_type) == FileClass::Other,
        class => FileClass::classify(mime_type) == class,
    }
}

fn matches_scope(scope: FolderScope, container: Option<Uuid>) -> bool {
    match scope {
        FolderScope::Any => true,
        FolderScope::Root => container.is_none(),
        FolderScope::In(id) => container == Some(id),
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[async_trait]
impl FolderStore for MemoryDrive {
    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Folder>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .folders
            .get(&id)
            .filter(|f| f.owner_id == owner_id)
            .cloned())
    }

    async fn list(&self, owner_id: Uuid, query: &FolderQuery) -> AppResult<Vec<Folder>> {
        let state = self.state.lock().unwrap();
        let mut out: Vec<Folder> = state
            .folders
            .values()
            .filter(|f| f.owner_id == owner_id)
            .filter(|f| matches_scope(query.scope, f.parent_id))
            .filter(|f| {
                query
                    .search_term()
                    .map(|term| contains_ci(&f.name, term))
                    .unwrap_or(true)
            })
            .cloned()
            .collect();
        out.sort_by(|a, b| {
            let ord = match query.sort_by {
                FolderSortKey::Name => a.name.cmp(&b.name),
                FolderSortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            };
            match query.sort_order {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
        Ok(out)
    }

    async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        let folder = folder_row(&data.name, data.owner_id, data.parent_id);
        let mut state = self.state.lock().unwrap();
        state.folders.insert(folder.id, folder.clone());
        Ok(folder)
    }

    async fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        update: &UpdateFolder,
    ) -> AppResult<Option<Folder>> {
        let mut state = self.state.lock().unwrap();
        let Some(folder) = state
            .folders
            .get_mut(&id)
            .filter(|f| f.owner_id == owner_id)
        else {
            return Ok(None);
        };
        if let Some(name) = &update.name {
            folder.name = name.clone();
        }
        if let Some(parent_id) = update.parent_id {
            folder.parent_id = parent_id;
        }
        folder.updated_at = Utc::now();
        Ok(Some(folder.clone()))
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        let mut state = self.state.lock().unwrap();
        let owned = state
            .folders
            .get(&id)
            .map(|f| f.owner_id == owner_id)
            .unwrap_or(false);
        if !owned {
            return Ok(false);
        }
        let doomed = MemoryDrive::descendant_folders(&state, id);
        for folder_id in &doomed {
            state.folders.remove(folder_id);
        }
        state
            .files
            .retain(|_, f| !f.folder_id.map(|fid| doomed.contains(&fid)).unwrap_or(false));
        Ok(true)
    }
}

#[async_trait]
impl FileStore for MemoryDrive {
    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<File>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .files
            .get(&id)
            .filter(|f| f.owner_id == owner_id)
            .cloned())
    }

    async fn list(&self, owner_id: Uuid, query: &FileQuery) -> AppResult<Vec<File>> {
        let state = self.state.lock().unwrap();
        let mut out: Vec<File> = state
            .files
            .values()
            .filter(|f| f.owner_id == owner_id)
            .filter(|f| f.is_trashed == query.trashed)
            .filter(|f| !query.starred || f.is_starred)
            .filter(|f| matches_scope(query.scope, f.folder_id))
            .filter(|f| {
                query
                    .search_term()
                    .map(|term| contains_ci(&f.name, term))
                    .unwrap_or(true)
            })
            .filter(|f| matches_class(&f.mime_type, query.file_type))
            .cloned()
            .collect();
        out.sort_by(|a, b| {
            let ord = match query.sort_by {
                FileSortKey::Name => a.name.cmp(&b.name),
                FileSortKey::Size => a.size.cmp(&b.size),
                FileSortKey::CreatedAt => a.created_at.cmp(&b.created_at),
                FileSortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            };
            match query.sort_order {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
        Ok(out)
    }

    async fn list_in_folder(&self, folder_id: Uuid, owner_id: Uuid) -> AppResult<Vec<File>> {
        let state = self.state.lock().unwrap();
        let mut out: Vec<File> = state
            .files
            .values()
            .filter(|f| f.owner_id == owner_id && f.folder_id == Some(folder_id))
            .cloned()
            .collect();
        out.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(out)
    }

    async fn create(&self, data: &CreateFile) -> AppResult<File> {
        let mut state = self.state.lock().unwrap();
        if state
            .files
            .values()
            .any(|f| f.storage_key == data.storage_key)
        {
            return Err(AppError::conflict(format!(
                "Storage key '{}' is already registered",
                data.storage_key
            )));
        }
        let now = Utc::now();
        let file = File {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            owner_id: data.owner_id,
            folder_id: data.folder_id,
            size: data.size,
            mime_type: data.mime_type.clone(),
            storage_key: data.storage_key.clone(),
            is_starred: false,
            is_trashed: false,
            trashed_at: None,
            created_at: now,
            updated_at: now,
        };
        state.files.insert(file.id, file.clone());
        Ok(file)
    }

    async fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        update: &UpdateFile,
    ) -> AppResult<Option<File>> {
        let mut state = self.state.lock().unwrap();
        let Some(file) = state.files.get_mut(&id).filter(|f| f.owner_id == owner_id) else {
            return Ok(None);
        };
        if let Some(name) = &update.name {
            file.name = name.clone();
        }
        if let Some(folder_id) = update.folder_id {
            file.folder_id = folder_id;
        }
        if let Some(starred) = update.is_starred {
            file.is_starred = starred;
        }
        file.updated_at = Utc::now();
        Ok(Some(file.clone()))
    }

    async fn set_trashed(
        &self,
        id: Uuid,
        owner_id: Uuid,
        trashed: bool,
    ) -> AppResult<Option<File>> {
        let mut state = self.state.lock().unwrap();
        let Some(file) = state.files.get_mut(&id).filter(|f| f.owner_id == owner_id) else {
            return Ok(None);
        };
        file.is_trashed = trashed;
        file.trashed_at = trashed.then(Utc::now);
        file.updated_at = Utc::now();
        Ok(Some(file.clone()))
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        let mut state = self.state.lock().unwrap();
        let owned = state
            .files
            .get(&id)
            .map(|f| f.owner_id == owner_id)
            .unwrap_or(false);
        if owned {
            state.files.remove(&id);
        }
        Ok(owned)
    }

    async fn usage(&self, owner_id: Uuid, include_trashed: bool) -> AppResult<StorageUsage> {
        let state = self.state.lock().unwrap();
        let mut usage = StorageUsage::default();
        for file in state.files.values() {
            if file.owner_id != owner_id {
                continue;
            }
            if !include_trashed && file.is_trashed {
                continue;
            }
            usage.total_size += file.size;
            usage.file_count += 1;
        }
        Ok(usage)
    }
}

/// Object store double that records deletions in order.
#[derive(Debug, Default)]
pub struct MemoryObjects {
    deleted: Mutex<Vec<String>>,
    fail_deletes: AtomicBool,
}

impl MemoryObjects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent delete fail with a storage error.
    pub fn fail_deletes(&self) {
        self.fail_deletes.store(true, Ordering::SeqCst);
    }

    /// Keys deleted so far, oldest first.
    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjects {
    async fn sign_upload(
        &self,
        key: &str,
        _content_type: &str,
        _ttl: Duration,
    ) -> AppResult<String> {
        Ok(format!("memory://upload/{key}"))
    }

    async fn sign_download(&self, key: &str, _ttl: Duration) -> AppResult<String> {
        Ok(format!("memory://download/{key}"))
    }

    async fn delete_object(&self, key: &str) -> AppResult<()> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(AppError::storage(format!(
                "Simulated failure deleting '{key}'"
            )));
        }
        self.deleted.lock().unwrap().push(key.to_string());
        Ok(())
    }
}
