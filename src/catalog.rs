use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::state::Resource;

/// A stored document named a course or section outside the fixed catalog.
#[derive(Error, Debug)]
#[error("unknown {kind} name: {name:?}")]
pub struct UnknownName {
    kind: &'static str,
    name: String,
}

/// The six course topics, in sidebar order. Serialized as the display name.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(into = "&'static str", try_from = "String")]
pub enum Course {
    IntroDataScience,
    DataAnalysisPython,
    MachineLearning,
    DeepLearning,
    BigData,
    DataVisualization,
}

/// Content slots shared by every course, in display order.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(into = "&'static str", try_from = "String")]
pub enum Section {
    Overview,
    LearningObjectives,
    Prerequisites,
    KeyConcepts,
    Resources,
    HandsOnPractices,
    Quizzes,
    AdditionalNotes,
    CommunityAndSupport,
    FeedbackMechanism,
}

impl Course {
    pub const ALL: [Course; 6] = [
        Course::IntroDataScience,
        Course::DataAnalysisPython,
        Course::MachineLearning,
        Course::DeepLearning,
        Course::BigData,
        Course::DataVisualization,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Course::IntroDataScience => "Introduction to Data Science",
            Course::DataAnalysisPython => "Data Analysis with Python",
            Course::MachineLearning => "Machine Learning Fundamentals",
            Course::DeepLearning => "Deep Learning and Neural Networks",
            Course::BigData => "Big Data Processing",
            Course::DataVisualization => "Data Visualization",
        }
    }

    /// Static text the Overview section is seeded with on first visit.
    pub fn overview(self) -> &'static str {
        match self {
            Course::IntroDataScience => {
                "Data Science is an interdisciplinary field that uses scientific methods, processes, algorithms and systems to extract knowledge and insights from structured and unstructured data. This course provides a comprehensive introduction to the core concepts, tools, and techniques used in data science."
            }
            Course::DataAnalysisPython => {
                "Python has become one of the most popular programming languages for data analysis due to its simplicity and powerful libraries. This course focuses on using Python for data manipulation, analysis, and visualization, covering essential libraries such as pandas, NumPy, and Matplotlib."
            }
            Course::MachineLearning => {
                "Machine Learning is a subset of artificial intelligence that provides systems the ability to automatically learn and improve from experience without being explicitly programmed. This course covers the fundamental concepts, algorithms, and practical applications of machine learning."
            }
            Course::DeepLearning => {
                "Deep Learning is a subset of machine learning based on artificial neural networks. This course delves into the architecture and training of deep neural networks, covering topics such as convolutional neural networks (CNNs), recurrent neural networks (RNNs), and their applications in various domains."
            }
            Course::BigData => {
                "Big Data refers to extremely large datasets that may be analyzed computationally to reveal patterns, trends, and associations. This course introduces technologies and frameworks for processing and analyzing big data, including Hadoop, Spark, and distributed computing concepts."
            }
            Course::DataVisualization => {
                "Data Visualization is the graphical representation of information and data. This course explores various techniques and tools for creating effective and compelling visualizations, helping learners to communicate complex data insights in a clear and impactful manner."
            }
        }
    }

    /// The resource list a course starts with before any edits.
    pub fn default_resources(self) -> Vec<Resource> {
        let links: [(&str, &str); 3] = match self {
            Course::IntroDataScience => [
                (
                    "Data Science for Beginners - A Curriculum",
                    "https://github.com/microsoft/Data-Science-For-Beginners",
                ),
                (
                    "Introduction to Data Science (Coursera)",
                    "https://www.coursera.org/specializations/introduction-data-science",
                ),
                (
                    "Data Science: Foundations using R Specialization",
                    "https://www.coursera.org/specializations/data-science-foundations-r",
                ),
            ],
            Course::DataAnalysisPython => [
                ("Python for Data Analysis (Book)", "https://wesmckinney.com/book/"),
                (
                    "Data Analysis with Python (Coursera)",
                    "https://www.coursera.org/learn/data-analysis-with-python",
                ),
                (
                    "Python Data Science Handbook",
                    "https://jakevdp.github.io/PythonDataScienceHandbook/",
                ),
            ],
            Course::MachineLearning => [
                (
                    "Machine Learning by Andrew Ng (Coursera)",
                    "https://www.coursera.org/learn/machine-learning",
                ),
                (
                    "Introduction to Machine Learning with Python",
                    "https://github.com/amueller/introduction_to_ml_with_python",
                ),
                (
                    "Scikit-Learn Documentation",
                    "https://scikit-learn.org/stable/documentation.html",
                ),
            ],
            Course::DeepLearning => [
                (
                    "Deep Learning Specialization (Coursera)",
                    "https://www.coursera.org/specializations/deep-learning",
                ),
                ("TensorFlow Documentation", "https://www.tensorflow.org/learn"),
                ("PyTorch Tutorials", "https://pytorch.org/tutorials/"),
            ],
            Course::BigData => [
                (
                    "Big Data Specialization (Coursera)",
                    "https://www.coursera.org/specializations/big-data",
                ),
                (
                    "Apache Spark Documentation",
                    "https://spark.apache.org/docs/latest/",
                ),
                ("Hadoop Documentation", "https://hadoop.apache.org/docs/"),
            ],
            Course::DataVisualization => [
                (
                    "Data Visualization with Python (Coursera)",
                    "https://www.coursera.org/learn/python-for-data-visualization",
                ),
                (
                    "Matplotlib Documentation",
                    "https://matplotlib.org/stable/contents.html",
                ),
                ("D3.js Documentation", "https://d3js.org/"),
            ],
        };

        links
            .iter()
            .map(|(title, url)| Resource::new(*title, *url))
            .collect()
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Course> for &'static str {
    fn from(course: Course) -> Self {
        course.name()
    }
}

impl TryFrom<String> for Course {
    type Error = UnknownName;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Course::ALL
            .into_iter()
            .find(|c| c.name() == name)
            .ok_or(UnknownName {
                kind: "course",
                name,
            })
    }
}

impl Section {
    pub const ALL: [Section; 10] = [
        Section::Overview,
        Section::LearningObjectives,
        Section::Prerequisites,
        Section::KeyConcepts,
        Section::Resources,
        Section::HandsOnPractices,
        Section::Quizzes,
        Section::AdditionalNotes,
        Section::CommunityAndSupport,
        Section::FeedbackMechanism,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Section::Overview => "Overview",
            Section::LearningObjectives => "Learning Objectives",
            Section::Prerequisites => "Prerequisites",
            Section::KeyConcepts => "Key Concepts",
            Section::Resources => "Resources",
            Section::HandsOnPractices => "Hands-on Practices",
            Section::Quizzes => "Quizzes",
            Section::AdditionalNotes => "Additional Notes",
            Section::CommunityAndSupport => "Community and Support",
            Section::FeedbackMechanism => "Feedback Mechanism",
        }
    }

    /// Feedback Mechanism never enters edit mode.
    pub fn is_editable(self) -> bool {
        self != Section::FeedbackMechanism
    }

    /// Text a freshly visited course gets for this section.
    pub fn seed_text(self, course: Course) -> String {
        match self {
            Section::Overview => course.overview().to_string(),
            _ => String::new(),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Section> for &'static str {
    fn from(section: Section) -> Self {
        section.name()
    }
}

impl TryFrom<String> for Section {
    type Error = UnknownName;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Section::ALL
            .into_iter()
            .find(|s| s.name() == name)
            .ok_or(UnknownName {
                kind: "section",
                name,
            })
    }
}
