//! Application state: course content, resources and edit modes, with every
//! mutation written through to [`Storage`].

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::{Course, Section};
use crate::error::{HubError, Result};
use crate::storage::Storage;

pub type ContentTree = BTreeMap<Course, BTreeMap<Section, String>>;
pub type ResourceMap = BTreeMap<Course, Vec<Resource>>;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Resource {
    pub title: String,
    pub url: String,
}

impl Resource {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    pub fn field(&self, field: ResourceField) -> &str {
        match field {
            ResourceField::Title => &self.title,
            ResourceField::Url => &self.url,
        }
    }

    fn field_mut(&mut self, field: ResourceField) -> &mut String {
        match field {
            ResourceField::Title => &mut self.title,
            ResourceField::Url => &mut self.url,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceField {
    Title,
    Url,
}

impl ResourceField {
    pub fn other(self) -> Self {
        match self {
            ResourceField::Title => ResourceField::Url,
            ResourceField::Url => ResourceField::Title,
        }
    }
}

/// `course -> section -> text`, populated the first time a course is visited.
#[derive(Debug, Default, Clone)]
pub struct ContentStore {
    tree: ContentTree,
}

impl ContentStore {
    /// Wraps a restored tree, filling in any section a visited course lacks.
    pub fn from_tree(mut tree: ContentTree) -> Self {
        for (course, sections) in tree.iter_mut() {
            for section in Section::ALL {
                sections
                    .entry(section)
                    .or_insert_with(|| section.seed_text(*course));
            }
        }
        Self { tree }
    }

    pub fn is_visited(&self, course: Course) -> bool {
        self.tree.contains_key(&course)
    }

    /// Seeds every section of `course` unless it is already present.
    /// Returns whether anything changed.
    pub fn seed(&mut self, course: Course) -> bool {
        if self.is_visited(course) {
            return false;
        }
        let sections = Section::ALL
            .into_iter()
            .map(|section| (section, section.seed_text(course)))
            .collect();
        self.tree.insert(course, sections);
        true
    }

    pub fn set(&mut self, course: Course, section: Section, text: String) {
        self.seed(course);
        self.tree.entry(course).or_default().insert(section, text);
    }

    pub fn get(&self, course: Course, section: Section) -> Option<&str> {
        self.tree
            .get(&course)
            .and_then(|sections| sections.get(&section))
            .map(String::as_str)
    }

    pub fn sections(&self, course: Course) -> Option<&BTreeMap<Section, String>> {
        self.tree.get(&course)
    }

    pub fn tree(&self) -> &ContentTree {
        &self.tree
    }
}

/// `course -> ordered resource list`, starting from the static catalog.
#[derive(Debug, Clone)]
pub struct ResourceStore {
    map: ResourceMap,
}

impl Default for ResourceStore {
    fn default() -> Self {
        let map = Course::ALL
            .into_iter()
            .map(|course| (course, course.default_resources()))
            .collect();
        Self { map }
    }
}

impl ResourceStore {
    /// Stored lists win; courses the stored map lacks keep their defaults.
    pub fn from_stored(stored: ResourceMap) -> Self {
        let mut store = Self::default();
        store.map.extend(stored);
        store
    }

    pub fn list(&self, course: Course) -> &[Resource] {
        self.map.get(&course).map(Vec::as_slice).unwrap_or_default()
    }

    /// Appends an empty resource and returns its index.
    pub fn add(&mut self, course: Course) -> usize {
        let list = self.map.entry(course).or_default();
        list.push(Resource::default());
        list.len() - 1
    }

    pub fn edit(
        &mut self,
        course: Course,
        index: usize,
        field: ResourceField,
        value: String,
    ) -> Result<()> {
        let resource = self.slot(course, index)?;
        *resource.field_mut(field) = value;
        Ok(())
    }

    pub fn remove(&mut self, course: Course, index: usize) -> Result<Resource> {
        self.slot(course, index)?;
        let list = self.map.entry(course).or_default();
        Ok(list.remove(index))
    }

    pub fn map(&self) -> &ResourceMap {
        &self.map
    }

    fn slot(&mut self, course: Course, index: usize) -> Result<&mut Resource> {
        let list = self.map.entry(course).or_default();
        let len = list.len();
        list.get_mut(index)
            .ok_or(HubError::ResourceIndex { course, index, len })
    }
}

/// Which sections are showing an editor rather than rendered content.
#[derive(Debug, Default, Clone)]
pub struct EditModeStore {
    flags: HashMap<(Course, Section), bool>,
}

impl EditModeStore {
    /// All sections of the given courses start in view mode.
    pub fn for_courses(courses: impl IntoIterator<Item = Course>) -> Self {
        let mut store = Self::default();
        for course in courses {
            store.reset(course);
        }
        store
    }

    pub fn reset(&mut self, course: Course) {
        for section in Section::ALL {
            self.flags.insert((course, section), false);
        }
    }

    pub fn is_editing(&self, course: Course, section: Section) -> bool {
        self.flags
            .get(&(course, section))
            .copied()
            .unwrap_or(false)
    }

    /// Flips the flag and returns the new value. Sections that cannot be
    /// edited stay in view mode.
    pub fn toggle(&mut self, course: Course, section: Section) -> bool {
        if !section.is_editable() {
            return false;
        }
        let flag = self.flags.entry((course, section)).or_insert(false);
        *flag = !*flag;
        *flag
    }

    pub fn set_viewing(&mut self, course: Course, section: Section) {
        self.flags.insert((course, section), false);
    }
}

/// The single owner of all hub state. Every mutation goes through here and
/// is persisted before returning.
pub struct HubState {
    content: ContentStore,
    resources: ResourceStore,
    edit_mode: EditModeStore,
    active: Option<Course>,
    storage: Storage,
}

impl HubState {
    /// Restores state from storage. The returned messages describe stored
    /// documents that had to be discarded.
    pub fn open(storage: Storage) -> (Self, Vec<String>) {
        let loaded = storage.load();
        let content = loaded
            .content
            .map(ContentStore::from_tree)
            .unwrap_or_default();
        let resources = loaded
            .resources
            .map(ResourceStore::from_stored)
            .unwrap_or_default();
        let edit_mode = EditModeStore::for_courses(content.tree().keys().copied());
        debug!(
            visited = content.tree().len(),
            "restored hub state from storage"
        );

        let state = Self {
            content,
            resources,
            edit_mode,
            active: None,
            storage,
        };
        (state, loaded.problems)
    }

    /// Starts from the static catalog without reading storage.
    pub fn fresh(storage: Storage) -> Self {
        Self {
            content: ContentStore::default(),
            resources: ResourceStore::default(),
            edit_mode: EditModeStore::default(),
            active: None,
            storage,
        }
    }

    pub fn active(&self) -> Option<Course> {
        self.active
    }

    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    pub fn resources(&self) -> &ResourceStore {
        &self.resources
    }

    pub fn edit_mode(&self) -> &EditModeStore {
        &self.edit_mode
    }

    /// Makes `course` active, seeding its sections on the first visit.
    pub fn select_course(&mut self, course: Course) -> Result<()> {
        self.active = Some(course);
        if self.content.seed(course) {
            debug!(%course, "seeded course content");
            self.edit_mode.reset(course);
            self.storage.persist_content(self.content.tree())?;
        }
        Ok(())
    }

    pub fn go_home(&mut self) {
        self.active = None;
    }

    pub fn edit_section(&mut self, course: Course, section: Section, text: String) -> Result<()> {
        self.content.set(course, section, text);
        self.storage.persist_content(self.content.tree())
    }

    pub fn add_resource(&mut self, course: Course) -> Result<usize> {
        let index = self.resources.add(course);
        debug!(%course, index, "added resource");
        self.storage.persist_resources(self.resources.map())?;
        Ok(index)
    }

    pub fn edit_resource(
        &mut self,
        course: Course,
        index: usize,
        field: ResourceField,
        value: String,
    ) -> Result<()> {
        self.resources.edit(course, index, field, value)?;
        self.storage.persist_resources(self.resources.map())
    }

    pub fn remove_resource(&mut self, course: Course, index: usize) -> Result<Resource> {
        let removed = self.resources.remove(course, index)?;
        debug!(%course, index, "removed resource");
        self.storage.persist_resources(self.resources.map())?;
        Ok(removed)
    }

    pub fn toggle_edit(&mut self, course: Course, section: Section) -> bool {
        self.edit_mode.toggle(course, section)
    }

    /// Leaves edit mode. The text itself was committed by `edit_section`.
    pub fn save_section(&mut self, course: Course, section: Section) {
        self.edit_mode.set_viewing(course, section);
        info!("saved {section} for {course}");
    }

    /// There is no deployment target; this only produces the acknowledgment.
    pub fn deploy(&self, course: Course) -> String {
        info!("deploying {course}");
        format!("{course} has been deployed!")
    }
}
