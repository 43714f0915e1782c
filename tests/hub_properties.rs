use dshub::{Course, HubState, MemoryStore, ResourceField, Section, Storage};
use proptest::prelude::*;

fn fresh() -> (HubState, MemoryStore) {
    let mem = MemoryStore::new();
    (HubState::fresh(Storage::new(mem.clone())), mem)
}

fn course() -> impl Strategy<Value = Course> {
    prop::sample::select(Course::ALL.to_vec())
}

fn section() -> impl Strategy<Value = Section> {
    prop::sample::select(Section::ALL.to_vec())
}

proptest! {
    #[test]
    fn select_course_is_idempotent(course in course()) {
        let (mut once, _) = fresh();
        once.select_course(course).unwrap();

        let (mut twice, _) = fresh();
        twice.select_course(course).unwrap();
        twice.select_course(course).unwrap();

        prop_assert_eq!(once.content().tree(), twice.content().tree());
    }

    #[test]
    fn edited_text_reads_back_exactly(course in course(), section in section(), text in any::<String>()) {
        let (mut hub, mem) = fresh();
        hub.select_course(course).unwrap();
        hub.edit_section(course, section, text.clone()).unwrap();
        prop_assert_eq!(hub.content().get(course, section), Some(text.as_str()));

        // and survives a reload
        let (reopened, problems) = HubState::open(Storage::new(mem));
        prop_assert!(problems.is_empty());
        prop_assert_eq!(reopened.content().get(course, section), Some(text.as_str()));
    }

    #[test]
    fn add_then_remove_restores_list(
        course in course(),
        extra in prop::collection::vec(("\\PC{0,12}", "\\PC{0,20}"), 0..4),
        drop_first in any::<bool>(),
    ) {
        let (mut hub, _) = fresh();
        if drop_first {
            hub.remove_resource(course, 0).unwrap();
        }
        for (title, url) in extra {
            let index = hub.add_resource(course).unwrap();
            hub.edit_resource(course, index, ResourceField::Title, title).unwrap();
            hub.edit_resource(course, index, ResourceField::Url, url).unwrap();
        }
        let before = hub.resources().list(course).to_vec();

        let index = hub.add_resource(course).unwrap();
        prop_assert_eq!(index, before.len());
        hub.remove_resource(course, index).unwrap();

        prop_assert_eq!(hub.resources().list(course), before.as_slice());
    }

    #[test]
    fn double_toggle_restores_flag(course in course(), section in section(), pre_toggle in any::<bool>()) {
        let (mut hub, _) = fresh();
        hub.select_course(course).unwrap();
        if pre_toggle {
            hub.toggle_edit(course, section);
        }
        let before = hub.edit_mode().is_editing(course, section);
        hub.toggle_edit(course, section);
        hub.toggle_edit(course, section);
        prop_assert_eq!(hub.edit_mode().is_editing(course, section), before);
    }
}

#[test]
fn fresh_visualization_overview() {
    let (mut hub, _) = fresh();
    hub.select_course(Course::DataVisualization).unwrap();

    let overview = hub
        .content()
        .get(Course::DataVisualization, Section::Overview)
        .unwrap();
    assert!(overview.starts_with("Data Visualization is the graphical representation"));

    let sections = hub.content().sections(Course::DataVisualization).unwrap();
    assert_eq!(
        sections.keys().copied().collect::<Vec<_>>(),
        Section::ALL.to_vec()
    );
    assert!(
        sections
            .iter()
            .filter(|(s, _)| **s != Section::Overview)
            .all(|(_, text)| text.is_empty())
    );
}

#[test]
fn big_data_add_and_remove_resource() {
    let (mut hub, _) = fresh();
    let course = Course::BigData;
    let original = hub.resources().list(course).to_vec();
    assert_eq!(original.len(), 3);

    let index = hub.add_resource(course).unwrap();
    hub.edit_resource(course, index, ResourceField::Title, "X".into())
        .unwrap();
    hub.edit_resource(course, index, ResourceField::Url, "http://x".into())
        .unwrap();
    assert_eq!(hub.resources().list(course).len(), 4);
    assert_eq!(hub.resources().list(course)[index].title, "X");

    let removed = hub.remove_resource(course, index).unwrap();
    assert_eq!(removed.url, "http://x");
    assert_eq!(hub.resources().list(course), original.as_slice());
}

#[test]
fn first_visit_writes_through_to_storage() {
    use dshub::KeyValueStore;
    use dshub::storage::{CONTENT_KEY, RESOURCES_KEY};

    let (mut hub, mem) = fresh();
    assert!(mem.get(CONTENT_KEY).unwrap().is_none());

    hub.select_course(Course::BigData).unwrap();
    let raw = mem.get(CONTENT_KEY).unwrap().unwrap();
    assert!(raw.starts_with(r#"{"Big Data Processing":{"Overview":"Big Data refers"#));
    // selecting alone never touches resources
    assert!(mem.get(RESOURCES_KEY).unwrap().is_none());

    hub.add_resource(Course::BigData).unwrap();
    let raw = mem.get(RESOURCES_KEY).unwrap().unwrap();
    assert!(raw.contains(r#"{"title":"","url":""}"#));
}

#[test]
fn corrupt_storage_falls_back_to_defaults() {
    use dshub::storage::{CONTENT_KEY, RESOURCES_KEY};

    let mem = MemoryStore::new()
        .with_entry(CONTENT_KEY, "<html>not json</html>")
        .with_entry(RESOURCES_KEY, r#"{"Big Data Processing":[]}"#);
    let (mut hub, problems) = HubState::open(Storage::new(mem));

    assert_eq!(problems.len(), 1);
    assert!(hub.content().tree().is_empty());
    assert!(hub.resources().list(Course::BigData).is_empty());
    assert_eq!(hub.resources().list(Course::DeepLearning).len(), 3);

    hub.select_course(Course::BigData).unwrap();
    assert_eq!(
        hub.content().get(Course::BigData, Section::Overview),
        Some(Course::BigData.overview())
    );
}

#[test]
fn restored_courses_start_in_view_mode() {
    let mem = MemoryStore::new();
    {
        let mut hub = HubState::fresh(Storage::new(mem.clone()));
        hub.select_course(Course::MachineLearning).unwrap();
        hub.toggle_edit(Course::MachineLearning, Section::Quizzes);
        hub.edit_section(Course::MachineLearning, Section::Quizzes, "Q1".into())
            .unwrap();
    }
    let (hub, _) = HubState::open(Storage::new(mem));
    assert!(
        !hub.edit_mode()
            .is_editing(Course::MachineLearning, Section::Quizzes)
    );
    assert_eq!(
        hub.content().get(Course::MachineLearning, Section::Quizzes),
        Some("Q1")
    );
    assert_eq!(hub.active(), None);
}
