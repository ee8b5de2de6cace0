mod node;

use std::collections::BTreeMap;
use std::sync::Arc;

use common::storage::{BlobRecord, BlobStore};

use crate::cache::PageCache;
use crate::error::AppError;
use crate::utils::path::{
    has_unpublished_segment, replace_final_segment, resolve_key, resolve_prefix,
    strip_tenant_prefix, validate_name,
};

pub use node::{FileNode, NodeKind};

/// Tenant-scoped hierarchical view over the flat blob store.
///
/// Every operation resolves its paths through the tenant path resolver
/// before touching storage; nothing here can address a key outside the
/// caller's namespace. Mutations purge the published-page cache entries
/// for the affected keys, so a rename or delete is visible on the public
/// route immediately rather than after the cache TTL.
#[derive(Clone)]
pub struct FileTree {
    store: Arc<dyn BlobStore>,
    cache: Option<Arc<dyn PageCache>>,
}

impl FileTree {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store, cache: None }
    }

    pub fn with_cache(store: Arc<dyn BlobStore>, cache: Arc<dyn PageCache>) -> Self {
        Self {
            store,
            cache: Some(cache),
        }
    }

    /// Drop the published-page cache entries addressing `key`.
    ///
    /// Extensionless public requests cache under the stem through the
    /// `.html` fallback, so that alias goes too.
    async fn purge_public(&self, key: &str) {
        let Some(cache) = &self.cache else {
            return;
        };
        cache.del(&format!("pub:{key}")).await;
        if let Some(stem) = key.strip_suffix(".html") {
            cache.del(&format!("pub:{stem}")).await;
        }
    }

    /// List files and synthetic folders under `path` (empty for the root).
    pub async fn list(&self, tenant_id: &str, path: &str) -> Result<Vec<FileNode>, AppError> {
        let prefix = resolve_prefix(tenant_id, path)?;
        let records = self.store.list(&prefix, None).await?;

        // The store lists by raw prefix, so `docs` also matches `docs-old/`.
        // Keep only the exact leaf and true children.
        let mut entries = Vec::new();
        for record in records {
            let Some(rest) = record.pathname.strip_prefix(&prefix) else {
                continue;
            };
            if prefix.ends_with('/') {
                entries.push((rest.to_string(), record));
            } else if rest.is_empty() || rest.starts_with('/') {
                entries.push((rest.trim_start_matches('/').to_string(), record));
            }
        }

        let root_rel = strip_tenant_prefix(&prefix, tenant_id)
            .trim_matches('/')
            .to_string();
        Ok(build_nodes(tenant_id, &root_rel, entries))
    }

    /// Check whether a blob exists at exactly `path`.
    pub async fn exists(&self, tenant_id: &str, path: &str) -> Result<bool, AppError> {
        let key = resolve_key(tenant_id, path)?;
        let records = self.store.list(&key, Some(1)).await?;
        Ok(records.first().is_some_and(|r| r.pathname == key))
    }

    /// Read the content of the file at `path`.
    pub async fn read(&self, tenant_id: &str, path: &str) -> Result<Vec<u8>, AppError> {
        let key = resolve_key(tenant_id, path)?;
        Ok(self.store.get(&key).await?)
    }

    /// Create or overwrite the file at `path`.
    pub async fn write(
        &self,
        tenant_id: &str,
        path: &str,
        content: &[u8],
    ) -> Result<FileNode, AppError> {
        let key = resolve_key(tenant_id, path)?;
        let content_type = mime_guess::from_path(&key)
            .first()
            .map(|m| m.to_string())
            .unwrap_or_else(|| "text/html".to_string());
        let record = self.store.put(&key, content, &content_type).await?;
        self.purge_public(&key).await;
        let rel = strip_tenant_prefix(&record.pathname, tenant_id).to_string();
        Ok(file_node(tenant_id, &rel, &record))
    }

    /// Delete the file at `path`.
    pub async fn delete(&self, tenant_id: &str, path: &str) -> Result<(), AppError> {
        let key = resolve_key(tenant_id, path)?;
        if self.store.delete(&key).await? {
            self.purge_public(&key).await;
            Ok(())
        } else {
            Err(AppError::NotFound(format!("No file at '{path}'")))
        }
    }

    /// Rename a file or folder, returning the new tenant-relative path.
    ///
    /// Rename is copy-then-delete; the store has no native move. Folder
    /// rename runs two explicit passes: copy every blob first, and only
    /// when the full copy set succeeded delete the originals. A failed copy
    /// aborts with zero deletions, so originals are never lost.
    pub async fn rename(
        &self,
        tenant_id: &str,
        old_path: &str,
        new_name: &str,
        kind: NodeKind,
    ) -> Result<String, AppError> {
        let old_key = resolve_key(tenant_id, old_path)?;
        let name = validate_name(new_name)
            .map_err(|e| AppError::InvalidName(e.message().into()))?;
        let new_key = replace_final_segment(&old_key, name);

        let prefix = format!("{tenant_id}/");
        if !new_key.starts_with(&prefix) || new_key.len() <= prefix.len() {
            return Err(AppError::InvalidName(
                "New name resolves outside the tenant namespace".into(),
            ));
        }

        match kind {
            NodeKind::File => {
                // A no-op rename still requires the source to exist.
                if self.store.head(&old_key).await?.is_none() {
                    return Err(AppError::NotFound(format!("No file at '{old_path}'")));
                }
                if new_key != old_key {
                    self.store.copy(&old_key, &new_key).await?;
                    self.store.delete(&old_key).await?;
                    self.purge_public(&old_key).await;
                    self.purge_public(&new_key).await;
                }
            }
            NodeKind::Folder => {
                let old_prefix = format!("{old_key}/");
                let records = self.store.list(&old_prefix, None).await?;
                if records.is_empty() {
                    return Err(AppError::NotFound(format!("No folder at '{old_path}'")));
                }

                if new_key != old_key {
                    // Pass 1: copy everything. Abort before any deletion on failure.
                    for record in &records {
                        let rest = &record.pathname[old_key.len()..];
                        let target = format!("{new_key}{rest}");
                        self.store.copy(&record.pathname, &target).await?;
                    }

                    // Pass 2: delete originals. A failure here leaves both copies
                    // present; the operation is re-tryable without data loss.
                    for record in &records {
                        if let Err(e) = self.store.delete(&record.pathname).await {
                            tracing::warn!(
                                key = %record.pathname,
                                "Folder rename: delete pass failed after full copy: {e}"
                            );
                            return Err(AppError::Upstream(format!(
                                "delete of '{}' failed after copy pass: {e}",
                                record.pathname
                            )));
                        }
                    }

                    for record in &records {
                        let rest = &record.pathname[old_key.len()..];
                        self.purge_public(&record.pathname).await;
                        self.purge_public(&format!("{new_key}{rest}")).await;
                    }
                }
            }
        }

        Ok(strip_tenant_prefix(&new_key, tenant_id).to_string())
    }
}

fn file_node(tenant_id: &str, rel_path: &str, record: &BlobRecord) -> FileNode {
    let published = !has_unpublished_segment(rel_path);
    FileNode {
        name: rel_path.rsplit('/').next().unwrap_or(rel_path).to_string(),
        kind: NodeKind::File,
        path: rel_path.to_string(),
        url: Some(record.url.clone()),
        size: Some(record.size),
        uploaded_at: Some(record.uploaded_at),
        children: None,
        is_published: Some(published),
        public_url: published.then(|| format!("/{tenant_id}/{rel_path}")),
    }
}

/// Group flat `(relative path, record)` entries into a tree, folders first.
///
/// Pure function of the listing; synthesized folders cover exactly the set
/// of immediate path-segment children of their prefix.
fn build_nodes(tenant_id: &str, parent_rel: &str, entries: Vec<(String, BlobRecord)>) -> Vec<FileNode> {
    let join = |name: &str| {
        if parent_rel.is_empty() {
            name.to_string()
        } else {
            format!("{parent_rel}/{name}")
        }
    };

    let mut folders: BTreeMap<String, Vec<(String, BlobRecord)>> = BTreeMap::new();
    let mut files: BTreeMap<String, BlobRecord> = BTreeMap::new();
    let mut leaf: Option<BlobRecord> = None;

    for (rel, record) in entries {
        if rel.is_empty() {
            // Exact leaf match: the listing prefix itself is a file.
            leaf = Some(record);
        } else if let Some((head, tail)) = rel.split_once('/') {
            folders
                .entry(head.to_string())
                .or_default()
                .push((tail.to_string(), record));
        } else {
            files.insert(rel, record);
        }
    }

    let mut nodes = Vec::with_capacity(folders.len() + files.len() + 1);
    for (name, children) in folders {
        let child_rel = join(&name);
        nodes.push(FileNode {
            name,
            kind: NodeKind::Folder,
            path: child_rel.clone(),
            url: None,
            size: None,
            uploaded_at: None,
            children: Some(build_nodes(tenant_id, &child_rel, children)),
            is_published: None,
            public_url: None,
        });
    }
    for (name, record) in files {
        nodes.push(file_node(tenant_id, &join(&name), &record));
    }
    if let Some(record) = leaf {
        nodes.push(file_node(tenant_id, parent_rel, &record));
    }
    nodes
}
