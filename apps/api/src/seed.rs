//! Built-in sample content loaded into local collections at startup
//! (disable with `SEED_DATA=false`).

use chrono::{TimeZone, Utc};

use crate::models::{Article, Course, CourseOffering, Exam, Institute, MeritList};

fn offering(name: &str, duration: &str, fees: &str, seats: &str) -> CourseOffering {
    CourseOffering {
        name: name.to_string(),
        duration: duration.to_string(),
        fees: fees.to_string(),
        seats: seats.to_string(),
    }
}

pub fn institutes() -> Vec<Institute> {
    vec![
        Institute {
            title: "College of Engineering Pune".to_string(),
            description: "Autonomous engineering institute established in 1854.".to_string(),
            location: "Shivajinagar, Pune".to_string(),
            affiliation: "Savitribai Phule Pune University".to_string(),
            phone: "020-25507000".to_string(),
            email: "info@coep.ac.in".to_string(),
            link: "https://www.coep.org.in".to_string(),
            courses: vec![
                offering("B.Tech Computer Engineering", "4 years", "90000", "120"),
                offering("B.Tech Civil Engineering", "4 years", "90000", "60"),
            ],
            created_at: Utc.with_ymd_and_hms(2024, 5, 2, 10, 30, 0).single(),
            ..Institute::default()
        },
        Institute {
            title: "Government Polytechnic Nagpur".to_string(),
            description: "State polytechnic offering three-year diploma programmes.".to_string(),
            location: "Sadar, Nagpur".to_string(),
            affiliation: "MSBTE".to_string(),
            phone: "0712-2565142".to_string(),
            email: "principal@gpnagpur.ac.in".to_string(),
            courses: vec![offering("Diploma in Mechanical Engineering", "3 years", "12000", "60")],
            created_at: Utc.with_ymd_and_hms(2024, 3, 18, 9, 0, 0).single(),
            ..Institute::default()
        },
    ]
}

pub fn courses() -> Vec<Course> {
    vec![
        Course {
            title: "B.Sc Agriculture".to_string(),
            description: "Four-year degree covering agronomy, soil science and horticulture."
                .to_string(),
            location: "Rahuri".to_string(),
            date: "2025-07-15".to_string(),
            link: "https://mpkv.ac.in".to_string(),
            ..Course::default()
        },
        Course {
            title: "Diploma in Pharmacy".to_string(),
            description: "Two-year D.Pharm programme approved by the Pharmacy Council of India."
                .to_string(),
            location: "Mumbai".to_string(),
            date: "2025-08-01".to_string(),
            ..Course::default()
        },
        Course {
            title: "Bachelor of Design".to_string(),
            description: "Studio-based undergraduate design programme.".to_string(),
            location: "Ahmedabad".to_string(),
            link: "https://www.nid.edu".to_string(),
            ..Course::default()
        },
    ]
}

pub fn articles() -> Vec<Article> {
    vec![
        Article {
            title: "Choosing between diploma and degree after 10th".to_string(),
            description: "A diploma gets you to work sooner and allows lateral entry into the \
                          second year of engineering."
                .to_string(),
            date: "2025-01-12".to_string(),
            ..Article::default()
        },
        Article {
            title: "How CAP rounds work".to_string(),
            description: "Centralised admission rounds allot seats by merit rank and the \
                          preference list you submit."
                .to_string(),
            date: "2025-02-03".to_string(),
            link: "https://cetcell.mahacet.org".to_string(),
            ..Article::default()
        },
    ]
}

pub fn merit_lists() -> Vec<MeritList> {
    vec![MeritList {
        title: "First-year engineering provisional merit list 2024".to_string(),
        description: "State-level provisional merit list for CAP round 1.".to_string(),
        location: "Maharashtra".to_string(),
        date: "2024-07-10".to_string(),
        document: "https://cetcell.mahacet.org/merit/fe-2024-provisional.pdf".to_string(),
        ..MeritList::default()
    }]
}

pub fn exams() -> Vec<Exam> {
    vec![
        Exam {
            title: "JEE Main 2025 Session 1".to_string(),
            description: "National entrance test for NITs, IIITs and JEE Advanced eligibility."
                .to_string(),
            date: "2025-01-22".to_string(),
            exam_type: "Entrance".to_string(),
            category: "Engineering".to_string(),
            level: "National".to_string(),
            link: "https://jeemain.nta.nic.in".to_string(),
            apply_link: "https://jeemain.nta.nic.in/registration".to_string(),
            ..Exam::default()
        },
        Exam {
            title: "MHT-CET 2025".to_string(),
            description: "State common entrance test for engineering and pharmacy.".to_string(),
            date: "2025-04-09".to_string(),
            exam_type: "Entrance".to_string(),
            category: "Engineering / Pharmacy".to_string(),
            level: "State".to_string(),
            link: "https://cetcell.mahacet.org".to_string(),
            ..Exam::default()
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EntityStore, FormController};
    use crate::models::Entity;

    /// Seeds must satisfy the same required-field rules as the admin form.
    fn assert_valid<T: Entity>(records: Vec<T>) {
        let store = EntityStore::with_records(records);
        for i in 0..store.len() {
            let mut form = FormController::<T>::new();
            form.begin_edit(&store, i).unwrap();
            assert!(form.validate().is_ok(), "seed {i} of {} invalid", T::schema().path);
        }
    }

    #[test]
    fn test_seed_records_are_valid() {
        assert_valid(institutes());
        assert_valid(courses());
        assert_valid(articles());
        assert_valid(merit_lists());
        assert_valid(exams());
    }
}
