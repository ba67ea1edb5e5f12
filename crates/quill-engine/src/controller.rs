use std::sync::Arc;

use tracing::warn;

use quill_gate::{CredentialRegistry, Session};
use quill_store::{FsSnapshotStore, SnapshotStore};
use quill_types::{Blog, BlogId, Post, PostCode};

use crate::blogs::BlogStore;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::posts::PostStore;

/// The engine's sole entry point.
///
/// Pure orchestration: every operation checks the session first, then the
/// blog-selection state where required, then delegates to the blog store or
/// the current blog's post store and passes the result through unchanged.
/// The controller owns the session, the credential registry, and the store
/// handles, but no record data of its own.
///
/// `current_posts` is `Some` exactly while the session has a blog selected;
/// selection loads the blog's post snapshot and deselection drops it.
pub struct Controller {
    config: EngineConfig,
    registry: CredentialRegistry,
    session: Session,
    snapshots: Arc<dyn SnapshotStore>,
    blogs: BlogStore,
    current_posts: Option<PostStore>,
}

impl Controller {
    /// Open an engine over the filesystem backend described by `config`.
    ///
    /// Loads the credential file when one is configured, otherwise seeds
    /// the built-in users.
    pub fn open(config: EngineConfig) -> EngineResult<Self> {
        let registry = match &config.credentials_file {
            Some(path) => CredentialRegistry::from_file(path)?,
            None => CredentialRegistry::builtin(),
        };
        let snapshots: Arc<dyn SnapshotStore> = Arc::new(FsSnapshotStore::new(&config.data_dir));
        Ok(Self::with_backend(config, registry, snapshots))
    }

    /// Assemble an engine over an explicit backend and registry. This is
    /// the seam embedders and tests use to swap persistence.
    pub fn with_backend(
        config: EngineConfig,
        registry: CredentialRegistry,
        snapshots: Arc<dyn SnapshotStore>,
    ) -> Self {
        let blogs = BlogStore::open(snapshots.clone(), config.blogs_key(), config.autosave);
        Self {
            config,
            registry,
            session: Session::new(),
            snapshots,
            blogs,
            current_posts: None,
        }
    }

    /// The configuration this engine was opened with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    // ---- Session operations ----

    /// Authenticate the session.
    pub fn login(&mut self, username: &str, password: &str) -> EngineResult<()> {
        self.session.login(&self.registry, username, password)?;
        Ok(())
    }

    /// End the session, dropping any loaded post collection.
    pub fn logout(&mut self) -> EngineResult<()> {
        self.session.logout()?;
        self.current_posts = None;
        Ok(())
    }

    /// Select the blog whose posts subsequent operations act on.
    pub fn set_current_blog(&mut self, id: BlogId) -> EngineResult<()> {
        self.session.require_authenticated()?;
        if self.blogs.search(id).is_none() {
            return Err(EngineError::NotFound(id));
        }
        self.session.select_blog(id)?;
        self.current_posts = Some(PostStore::open(
            id,
            self.snapshots.clone(),
            self.config.posts_key(id),
            self.config.autosave,
        ));
        Ok(())
    }

    /// Drop the current-blog selection. Idempotent.
    pub fn unset_current_blog(&mut self) -> EngineResult<()> {
        self.session.clear_selection()?;
        self.current_posts = None;
        Ok(())
    }

    /// The currently selected blog's record, if a selection is set.
    pub fn get_current_blog(&self) -> EngineResult<Option<Blog>> {
        self.session.require_authenticated()?;
        Ok(self
            .session
            .current_blog()
            .and_then(|id| self.blogs.search(id))
            .cloned())
    }

    // ---- Blog operations ----

    pub fn create_blog(
        &mut self,
        id: BlogId,
        name: &str,
        url: &str,
        email: &str,
    ) -> EngineResult<Blog> {
        self.session.require_authenticated()?;
        self.blogs.create(id, name, url, email)
    }

    pub fn search_blog(&self, id: BlogId) -> EngineResult<Option<Blog>> {
        self.session.require_authenticated()?;
        Ok(self.blogs.search(id).cloned())
    }

    /// Blogs whose name contains `needle`, in id order.
    pub fn retrieve_blogs(&self, needle: &str) -> EngineResult<Vec<Blog>> {
        self.session.require_authenticated()?;
        Ok(self.blogs.retrieve_by_name(needle))
    }

    /// Update a blog's data, possibly re-keying it under a new id. The
    /// current blog is locked against updates.
    pub fn update_blog(
        &mut self,
        existing_id: BlogId,
        new_id: BlogId,
        name: &str,
        url: &str,
        email: &str,
    ) -> EngineResult<Blog> {
        self.session.require_authenticated()?;
        self.ensure_not_current(existing_id)?;
        let updated = self.blogs.update(existing_id, new_id, name, url, email)?;
        if new_id != existing_id {
            // The posts blob follows the blog to its new key.
            let from = self.config.posts_key(existing_id);
            let to = self.config.posts_key(new_id);
            if let Err(e) = self.snapshots.rename(&from, &to) {
                warn!(from, to, error = %e, "post snapshot move failed");
            }
        }
        Ok(updated)
    }

    /// Delete a blog and its post collection. The current blog is locked
    /// against deletion.
    pub fn delete_blog(&mut self, id: BlogId) -> EngineResult<Blog> {
        self.session.require_authenticated()?;
        self.ensure_not_current(id)?;
        let removed = self.blogs.delete(id)?;
        let key = self.config.posts_key(id);
        if let Err(e) = self.snapshots.remove(&key) {
            warn!(key, error = %e, "post snapshot cascade removal failed");
        }
        Ok(removed)
    }

    /// All blogs, ascending by id.
    pub fn list_blogs(&self) -> EngineResult<Vec<Blog>> {
        self.session.require_authenticated()?;
        Ok(self.blogs.list())
    }

    // ---- Post operations (require a current blog) ----

    /// Create a post on the current blog, allocating the next code from the
    /// blog's monotonic counter.
    pub fn create_post(&mut self, title: &str, text: &str) -> EngineResult<Post> {
        let blog_id = self.session.require_current_blog()?;
        let code = self.blogs.allocate_post_code(blog_id)?;
        let posts = self.current_posts.as_mut().ok_or(EngineError::NoCurrentBlog)?;
        posts.create(code, title, text)
    }

    pub fn search_post(&self, code: PostCode) -> EngineResult<Option<Post>> {
        Ok(self.posts()?.search(code).cloned())
    }

    /// Posts on the current blog matching `needle`, in creation order.
    pub fn retrieve_posts(&self, needle: &str) -> EngineResult<Vec<Post>> {
        Ok(self.posts()?.retrieve_by_text(needle))
    }

    pub fn update_post(&mut self, code: PostCode, title: &str, text: &str) -> EngineResult<Post> {
        self.posts_mut()?.update(code, title, text)
    }

    /// Delete a post. Its code is never reused.
    pub fn delete_post(&mut self, code: PostCode) -> EngineResult<Post> {
        self.posts_mut()?.delete(code)
    }

    /// Posts on the current blog, most recent first.
    pub fn list_posts(&self) -> EngineResult<Vec<Post>> {
        Ok(self.posts()?.list())
    }

    // ---- Guards ----

    fn ensure_not_current(&self, id: BlogId) -> EngineResult<()> {
        if self.session.current_blog() == Some(id) {
            return Err(EngineError::CurrentBlogLocked(id));
        }
        Ok(())
    }

    fn posts(&self) -> EngineResult<&PostStore> {
        self.session.require_current_blog()?;
        self.current_posts.as_ref().ok_or(EngineError::NoCurrentBlog)
    }

    fn posts_mut(&mut self) -> EngineResult<&mut PostStore> {
        self.session.require_current_blog()?;
        self.current_posts.as_mut().ok_or(EngineError::NoCurrentBlog)
    }
}
