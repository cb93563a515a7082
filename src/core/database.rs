//! In-memory storage for students, courses and pending notifications.
//!
//! The database performs no input validation. It offers lookup and
//! mutation primitives; the [`Controller`](crate::core::controller::Controller)
//! decides when to call them.

use crate::core::models::{Course, CourseAttribute, NewStudent, ScoreCard, Student, StudentId};
use crate::core::models::DEFAULT_CATALOG;
use crate::core::validation::normalize_email;
use crate::debug;
use std::collections::{BTreeMap, HashMap};

/// Monotonic source of student identifiers, starting at 1
#[derive(Debug, Clone)]
pub struct IdSequence {
    next: StudentId,
}

impl IdSequence {
    /// Create a sequence whose first identifier is 1
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// The identifier the next call to [`advance`](Self::advance) returns
    #[must_use]
    pub const fn peek(&self) -> StudentId {
        self.next
    }

    /// Hand out the next identifier
    pub fn advance(&mut self) -> StudentId {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// Newly completed courses waiting to be announced, grouped per student
#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    entries: Vec<(StudentId, Vec<String>)>,
}

impl NotificationQueue {
    /// Queue a completed course for a student
    pub fn push(&mut self, student_id: StudentId, course_key: &str) {
        if let Some((_, courses)) = self.entries.iter_mut().find(|(id, _)| *id == student_id) {
            courses.push(course_key.to_string());
        } else {
            self.entries
                .push((student_id, vec![course_key.to_string()]));
        }
    }

    /// Take every pending entry, leaving the queue empty
    pub fn drain(&mut self) -> Vec<(StudentId, Vec<String>)> {
        std::mem::take(&mut self.entries)
    }

    /// Pending entries without removing them
    #[must_use]
    pub fn pending(&self) -> &[(StudentId, Vec<String>)] {
        &self.entries
    }

    /// Number of students with pending notifications
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is pending
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Owner of all tracker state
#[derive(Debug, Clone)]
pub struct Database {
    students: BTreeMap<StudentId, Student>,
    emails: HashMap<String, StudentId>,
    courses: Vec<Course>,
    notifications: NotificationQueue,
    ids: IdSequence,
}

impl Database {
    /// Create an empty database over the default course catalog
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalog(DEFAULT_CATALOG.iter().map(Course::from).collect())
    }

    /// Create an empty database over a custom catalog (order is preserved)
    #[must_use]
    pub fn with_catalog(courses: Vec<Course>) -> Self {
        Self {
            students: BTreeMap::new(),
            emails: HashMap::new(),
            courses,
            notifications: NotificationQueue::default(),
            ids: IdSequence::new(),
        }
    }

    /// Store a student, assigning the next identifier
    ///
    /// The caller must already have checked that the email is unused.
    pub fn add_student(&mut self, credentials: NewStudent) -> StudentId {
        let id = self.ids.advance();
        let score_card = ScoreCard::new(id, self.course_keys());
        let student = Student::new(id, credentials, score_card);
        self.emails.insert(normalize_email(&student.email), id);
        self.students.insert(id, student);
        debug!("Stored student {id}");
        id
    }

    /// Look up a student by identifier
    #[must_use]
    pub fn get_student(&self, student_id: StudentId) -> Option<&Student> {
        self.students.get(&student_id)
    }

    /// Mutable lookup by identifier
    pub fn get_student_mut(&mut self, student_id: StudentId) -> Option<&mut Student> {
        self.students.get_mut(&student_id)
    }

    /// Look up a student by email (case-insensitive)
    #[must_use]
    pub fn get_student_by_email(&self, email: &str) -> Option<&Student> {
        self.emails
            .get(&normalize_email(email))
            .and_then(|id| self.students.get(id))
    }

    /// All student identifiers in ascending (registration) order
    #[must_use]
    pub fn student_ids(&self) -> Vec<StudentId> {
        self.students.keys().copied().collect()
    }

    /// Number of stored students
    #[must_use]
    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    /// Look up a course by key (case-insensitive)
    #[must_use]
    pub fn get_course(&self, course_name: &str) -> Option<&Course> {
        self.courses
            .iter()
            .find(|course| course.key.eq_ignore_ascii_case(course_name))
    }

    /// Mutable lookup by key (case-insensitive)
    pub fn get_course_mut(&mut self, course_name: &str) -> Option<&mut Course> {
        self.courses
            .iter_mut()
            .find(|course| course.key.eq_ignore_ascii_case(course_name))
    }

    /// All courses in catalog order
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Course keys in catalog order
    #[must_use]
    pub fn course_keys(&self) -> Vec<String> {
        self.courses.iter().map(|course| course.key.clone()).collect()
    }

    /// Courses whose `attribute` is at least `threshold`, in catalog order
    #[must_use]
    pub fn get_courses_by_attribute(&self, attribute: CourseAttribute, threshold: f64) -> Vec<&Course> {
        self.courses
            .iter()
            .filter(|course| course.attribute(attribute) >= threshold)
            .collect()
    }

    /// Identifiers enrolled in a course, in enrollment order
    #[must_use]
    pub fn enrolled_student_ids(&self, course_name: &str) -> Vec<StudentId> {
        self.get_course(course_name)
            .map(|course| course.enrolled_students.clone())
            .unwrap_or_default()
    }

    /// Cumulative points of a student in a course (0 if either is unknown)
    #[must_use]
    pub fn student_points(&self, student_id: StudentId, course_name: &str) -> u32 {
        self.get_student(student_id)
            .map_or(0, |student| student.score_card.get_points(course_name))
    }

    /// Mark a course completed if `new_points` carries the student across
    /// the pass threshold for the first time.
    ///
    /// Must be called before the points are added to the student's card.
    /// Returns whether the completion fired.
    pub fn update_completed_course(
        &mut self,
        student_id: StudentId,
        course_name: &str,
        new_points: u32,
    ) -> bool {
        let current_points = self.student_points(student_id, course_name);
        let Some(course) = self.get_course_mut(course_name) else {
            return false;
        };
        let threshold = course.pass_threshold;
        let crossed =
            new_points > 0 && current_points < threshold && threshold <= current_points + new_points;
        if !crossed {
            return false;
        }
        course.completed += 1;
        let course_key = course.key.clone();
        self.add_completed_notification(student_id, &course_key);
        debug!("Student {student_id} completed {course_key}");
        true
    }

    /// Enroll the student if this is their first positive score in the course.
    ///
    /// Must be called before the points are added to the student's card.
    /// Returns whether the student was newly enrolled.
    pub fn update_enrolled_course(
        &mut self,
        student_id: StudentId,
        course_name: &str,
        new_points: u32,
    ) -> bool {
        let current_points = self.student_points(student_id, course_name);
        if current_points != 0 || new_points == 0 {
            return false;
        }
        self.get_course_mut(course_name)
            .is_some_and(|course| course.enroll(student_id))
    }

    /// Queue a completion notification for a student
    pub fn add_completed_notification(&mut self, student_id: StudentId, course_key: &str) {
        self.notifications.push(student_id, course_key);
    }

    /// Pending notifications
    #[must_use]
    pub const fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    /// Take all pending notifications, leaving the queue empty
    pub fn drain_notifications(&mut self) -> Vec<(StudentId, Vec<String>)> {
        self.notifications.drain()
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(email: &str) -> NewStudent {
        NewStudent::new("John", "Doe", email).unwrap()
    }

    fn add_points(db: &mut Database, id: StudentId, course: &str, points: u32) {
        db.get_student_mut(id)
            .unwrap()
            .score_card
            .add_score(course, i64::from(points))
            .unwrap();
    }

    #[test]
    fn test_default_catalog() {
        let db = Database::new();
        assert_eq!(db.course_keys(), ["python", "dsa", "databases", "flask"]);
        assert_eq!(db.get_course("DSA").unwrap().pass_threshold, 400);
        assert!(db.get_course("rust").is_none());
    }

    #[test]
    fn test_ids_are_sequential_per_database() {
        let mut db = Database::new();
        assert_eq!(db.add_student(credentials("a@example.com")), 1);
        assert_eq!(db.add_student(credentials("b@example.com")), 2);

        let mut other = Database::new();
        assert_eq!(other.add_student(credentials("a@example.com")), 1);
    }

    #[test]
    fn test_email_lookup_is_exact_and_case_insensitive() {
        let mut db = Database::new();
        let id = db.add_student(credentials("John.Doe@Example.com"));

        assert_eq!(db.get_student_by_email("john.doe@example.com").unwrap().id(), id);
        assert!(db.get_student_by_email("jane.doe@example.com").is_none());
        assert_eq!(db.get_student(id).unwrap().email, "John.Doe@Example.com");
    }

    #[test]
    fn test_enrollment_fires_once() {
        let mut db = Database::new();
        let id = db.add_student(credentials("a@example.com"));

        assert!(!db.update_enrolled_course(id, "dsa", 0));
        assert!(db.update_enrolled_course(id, "dsa", 10));
        add_points(&mut db, id, "dsa", 10);
        assert!(!db.update_enrolled_course(id, "dsa", 10));

        assert_eq!(db.enrolled_student_ids("dsa"), vec![id]);
    }

    #[test]
    fn test_completion_fires_on_first_crossing_only() {
        let mut db = Database::new();
        let id = db.add_student(credentials("a@example.com"));

        assert!(!db.update_completed_course(id, "dsa", 399));
        add_points(&mut db, id, "dsa", 399);
        assert!(db.update_completed_course(id, "dsa", 1));
        add_points(&mut db, id, "dsa", 1);
        assert!(!db.update_completed_course(id, "dsa", 500));

        assert_eq!(db.get_course("dsa").unwrap().completed, 1);
        assert_eq!(db.notifications().pending(), [(id, vec!["dsa".to_string()])]);
    }

    #[test]
    fn test_courses_by_attribute() {
        let mut db = Database::new();
        db.get_course_mut("python").unwrap().record_submission(10);

        let active = db.get_courses_by_attribute(CourseAttribute::Submissions, 1.0);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].key, "python");
        assert_eq!(db.get_courses_by_attribute(CourseAttribute::Enrolled, 0.0).len(), 4);
    }

    #[test]
    fn test_notification_queue_groups_and_drains() {
        let mut queue = NotificationQueue::default();
        queue.push(2, "dsa");
        queue.push(1, "python");
        queue.push(2, "flask");

        assert_eq!(queue.len(), 2);
        let drained = queue.drain();
        assert_eq!(
            drained,
            vec![
                (2, vec!["dsa".to_string(), "flask".to_string()]),
                (1, vec!["python".to_string()]),
            ]
        );
        assert!(queue.is_empty());
        assert!(queue.drain().is_empty());
    }
}
