use dshub::app::{Focus, Mode};
use dshub::ui::draw_ui;
use dshub::{App, Course, HubState, MemoryStore, ResourceField, Section, Storage};
use ratatui::{Terminal, backend::TestBackend};

fn render(app: &mut App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| draw_ui(f, app)).unwrap();
    let buffer = terminal.backend().buffer();
    (0..buffer.area.height)
        .map(|y| {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn app() -> App {
    App::new(HubState::fresh(Storage::new(MemoryStore::new())), 80)
}

#[test]
fn welcome_screen_without_course() {
    let mut app = app();
    let screen = render(&mut app, 120, 30);
    assert!(screen.contains("Data Science Learning Accelerator Hub"));
    assert!(screen.contains("DS Topics"));
    for course in Course::ALL {
        assert!(screen.contains(course.name()), "{course} missing from sidebar");
    }
}

#[test]
fn active_course_shows_header_and_first_sections() {
    let mut app = app();
    app.state.select_course(Course::BigData).unwrap();
    app.focus = Focus::Main;
    let screen = render(&mut app, 140, 40);

    assert!(screen.contains("Big Data Processing"));
    assert!(screen.contains("Overview"));
    assert!(screen.contains("Big Data refers"));
    assert!(screen.contains("Add Learning Objectives content here..."));
    assert!(screen.contains("[Edit]"));
}

#[test]
fn narrow_terminal_hides_sidebar_until_menu_opens() {
    let mut app = app();
    let closed = render(&mut app, 60, 30);
    assert!(!closed.contains("DS Topics"));
    assert!(closed.contains("[m]"));

    app.menu_open = true;
    let open = render(&mut app, 60, 30);
    assert!(open.contains("DS Topics"));
}

#[test]
fn selected_section_scrolls_into_view() {
    let mut app = app();
    app.state.select_course(Course::DeepLearning).unwrap();
    app.focus = Focus::Main;
    app.section_selected = Section::ALL.len() - 1;
    let screen = render(&mut app, 120, 30);

    assert!(app.section_offset > 0);
    assert!(screen.contains("Feedback Mechanism"));
    assert!(screen.contains("Submit Feedback"));
}

#[test]
fn markup_and_escapes_render_as_plain_text() {
    let mut app = app();
    let course = Course::MachineLearning;
    app.state.select_course(course).unwrap();
    app.state
        .edit_section(course, Section::Overview, "<b>hi</b>\u{1b}[2J".into())
        .unwrap();
    let screen = render(&mut app, 120, 30);
    assert!(screen.contains("<b>hi</b>[2J"));
}

#[test]
fn notice_popup_is_drawn() {
    let mut app = app().with_notice(Some("Feedback submitted successfully!".into()));
    let screen = render(&mut app, 120, 30);
    assert!(screen.contains("Notice"));
    assert!(screen.contains("Feedback submitted successfully!"));
}

#[test]
fn resources_view_lists_titles_and_urls() {
    let mut app = app();
    let course = Course::DataVisualization;
    app.state.select_course(course).unwrap();
    app.section_selected = 4;
    let screen = render(&mut app, 140, 60);
    assert!(screen.contains("• Matplotlib Documentation"));
    assert!(screen.contains("https://d3js.org/"));
}

fn editing_long_resource_list(row: usize) -> App {
    let mut app = app();
    let course = Course::BigData;
    app.state.select_course(course).unwrap();
    for i in 0..30 {
        let index = app.state.add_resource(course).unwrap();
        app.state
            .edit_resource(course, index, ResourceField::Title, format!("ROW{i:02}"))
            .unwrap();
    }
    app.state.toggle_edit(course, Section::Resources);
    app.focus = Focus::Main;
    app.section_selected = 4;
    app.mode = Mode::EditingResources {
        row,
        field: ResourceField::Title,
    };
    app
}

#[test]
fn resource_editor_scrolls_to_the_edited_row() {
    let mut app = editing_long_resource_list(32);
    let screen = render(&mut app, 120, 30);
    assert!(screen.contains("ROW29"));
    assert!(!screen.contains("ROW00"));
    assert!(app.resource_offset > 0);

    app.mode = Mode::EditingResources {
        row: 0,
        field: ResourceField::Url,
    };
    let screen = render(&mut app, 120, 30);
    assert_eq!(app.resource_offset, 0);
    assert!(screen.contains("Big Data Specialization (Coursera)"));
    assert!(!screen.contains("ROW29"));
}

#[test]
fn oversized_resource_list_renders() {
    let rows = vec![r#"{"title":"","url":""}"#; 33_000].join(",");
    let doc = format!(r#"{{"Big Data Processing":[{rows}]}}"#);
    let mem = MemoryStore::new().with_entry(dshub::storage::RESOURCES_KEY, &doc);
    let (state, problems) = HubState::open(Storage::new(mem));
    assert!(problems.is_empty());

    let mut app = App::new(state, 80);
    app.state.select_course(Course::BigData).unwrap();
    app.focus = Focus::Main;
    app.section_selected = 4;
    let screen = render(&mut app, 120, 30);
    assert!(screen.contains("Resources"));

    app.state.toggle_edit(Course::BigData, Section::Resources);
    app.mode = Mode::EditingResources {
        row: 32_999,
        field: ResourceField::Title,
    };
    let screen = render(&mut app, 120, 30);
    assert!(screen.contains("Add Resource"));
}

#[test]
fn narrow_flag_follows_terminal_width() {
    let mut app = app();
    render(&mut app, 60, 30);
    assert!(app.narrow);
    assert!(app.sidebar_hidden());
    render(&mut app, 120, 30);
    assert!(!app.narrow);
}
