//! Interactive tracking session
//!
//! A line-oriented command loop over any `BufRead`/`Write` pair. Domain
//! errors are printed and the loop carries on; only I/O failures end the
//! session early.

use progress_tracker::config::Config;
use progress_tracker::core::models::CourseAttribute;
use progress_tracker::core::{Controller, InvalidInputError};
use progress_tracker::{debug, error, info};
use std::fmt;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::str::FromStr;

/// Top-level session commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerCommand {
    /// Leave the session
    Exit,
    /// Register students until `back`
    AddStudents,
    /// Print every student identifier
    List,
    /// Record submissions until `back`
    AddPoints,
    /// Show score cards until `back`
    Find,
    /// Show course statistics until `back`
    Statistics,
    /// Send pending completion notifications
    Notify,
}

impl FromStr for TrackerCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exit" => Ok(Self::Exit),
            "add students" => Ok(Self::AddStudents),
            "list" => Ok(Self::List),
            "add points" => Ok(Self::AddPoints),
            "find" => Ok(Self::Find),
            "statistics" => Ok(Self::Statistics),
            "notify" => Ok(Self::Notify),
            _ => Err(format!("Unknown command: {s}")),
        }
    }
}

impl fmt::Display for TrackerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Exit => "exit",
            Self::AddStudents => "add students",
            Self::List => "list",
            Self::AddPoints => "add points",
            Self::Find => "find",
            Self::Statistics => "statistics",
            Self::Notify => "notify",
        };
        write!(f, "{name}")
    }
}

/// Labels printed for the most/least extreme course of each attribute
const OVERVIEW_LABELS: [(CourseAttribute, &str, &str); 3] = [
    (CourseAttribute::Enrolled, "Most popular", "Least popular"),
    (CourseAttribute::Submissions, "Highest activity", "Lowest activity"),
    (CourseAttribute::AvgScore, "Easiest course", "Hardest course"),
];

/// One line of user input, already classified
#[derive(Debug, PartialEq, Eq)]
enum Line {
    Text(String),
    Back,
    Empty,
    Eof,
}

/// Whether the session keeps going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Run an interactive session on stdin/stdout using the session config
pub fn run(config: &Config) -> ExitCode {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(
        Controller::default(),
        stdin.lock(),
        stdout.lock(),
        config.session.prompt.clone(),
    );

    match session.run(&config.session.banner) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Session aborted: {e}");
            eprintln!("✗ Session aborted: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Command loop state: the controller plus its input and output streams
pub struct Session<R, W> {
    controller: Controller,
    input: R,
    output: W,
    prompt: String,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a session; `prompt` is printed before every read when non-empty
    pub fn new(controller: Controller, input: R, output: W, prompt: impl Into<String>) -> Self {
        Self {
            controller,
            input,
            output,
            prompt: prompt.into(),
        }
    }

    /// Print the banner and process commands until `exit` or end of input
    ///
    /// # Errors
    /// Returns an error if reading input or writing output fails.
    pub fn run(&mut self, banner: &str) -> io::Result<()> {
        if !banner.is_empty() {
            writeln!(self.output, "{banner}")?;
        }
        info!("Session started");

        loop {
            let flow = match self.next_line()? {
                Line::Eof => {
                    writeln!(self.output, "Bye!")?;
                    Flow::Exit
                }
                Line::Empty => self.report(&InvalidInputError::NoInput)?,
                Line::Back => {
                    writeln!(self.output, "Enter 'exit' to exit the program")?;
                    Flow::Continue
                }
                Line::Text(text) => match text.parse::<TrackerCommand>() {
                    Ok(command) => self.dispatch(command)?,
                    Err(_) => {
                        writeln!(self.output, "Error: unknown command!")?;
                        Flow::Continue
                    }
                },
            };
            if flow == Flow::Exit {
                break;
            }
        }

        info!("Session finished");
        self.output.flush()
    }

    fn dispatch(&mut self, command: TrackerCommand) -> io::Result<Flow> {
        debug!("Dispatching command '{command}'");
        match command {
            TrackerCommand::Exit => {
                writeln!(self.output, "Bye!")?;
                Ok(Flow::Exit)
            }
            TrackerCommand::AddStudents => self.add_students(),
            TrackerCommand::List => self.list_student_ids(),
            TrackerCommand::AddPoints => self.add_points(),
            TrackerCommand::Find => self.find(),
            TrackerCommand::Statistics => self.statistics(),
            TrackerCommand::Notify => self.notify(),
        }
    }

    /// Read and classify the next line
    fn next_line(&mut self) -> io::Result<Line> {
        if !self.prompt.is_empty() {
            write!(self.output, "{}", self.prompt)?;
            self.output.flush()?;
        }

        let mut buffer = String::new();
        if self.input.read_line(&mut buffer)? == 0 {
            return Ok(Line::Eof);
        }
        let line = buffer.trim();
        Ok(if line.is_empty() {
            Line::Empty
        } else if line.eq_ignore_ascii_case("back") {
            Line::Back
        } else {
            Line::Text(line.to_string())
        })
    }

    fn report(&mut self, err: &InvalidInputError) -> io::Result<Flow> {
        writeln!(self.output, "{err}")?;
        Ok(Flow::Continue)
    }

    /// Feed lines to `handle` until `back` (continue) or end of input (exit)
    fn sub_loop<F>(&mut self, mut handle: F) -> io::Result<Flow>
    where
        F: FnMut(&mut Self, &str) -> io::Result<()>,
    {
        loop {
            match self.next_line()? {
                Line::Eof => {
                    writeln!(self.output, "Bye!")?;
                    return Ok(Flow::Exit);
                }
                Line::Back => return Ok(Flow::Continue),
                Line::Empty => {
                    self.report(&InvalidInputError::NoInput)?;
                }
                Line::Text(text) => handle(self, &text)?,
            }
        }
    }

    fn add_students(&mut self) -> io::Result<Flow> {
        writeln!(self.output, "Enter student credentials or 'back' to return:")?;
        let mut added = 0_usize;
        let flow = self.sub_loop(|session, line| match session.controller.add_student(line) {
            Ok(_) => {
                added += 1;
                writeln!(session.output, "The student has been added.")
            }
            Err(e) => writeln!(session.output, "{e}"),
        })?;
        if flow == Flow::Continue {
            writeln!(self.output, "Total {added} students have been added.")?;
        }
        Ok(flow)
    }

    fn list_student_ids(&mut self) -> io::Result<Flow> {
        let student_ids = self.controller.list_student_ids();
        if student_ids.is_empty() {
            writeln!(self.output, "No students found.")?;
        } else {
            writeln!(self.output, "Students:")?;
            for student_id in student_ids {
                writeln!(self.output, "{student_id}")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn add_points(&mut self) -> io::Result<Flow> {
        writeln!(self.output, "Enter an id and points or 'back' to return")?;
        self.sub_loop(|session, line| match session.controller.add_points(line) {
            Ok(()) => writeln!(session.output, "Points updated."),
            Err(e) => writeln!(session.output, "{e}"),
        })
    }

    fn find(&mut self) -> io::Result<Flow> {
        writeln!(self.output, "Enter an id or 'back' to return:")?;
        self.sub_loop(|session, line| match session.controller.get_student(line) {
            Ok(student) => writeln!(session.output, "{}", student.score_card),
            Err(e) => writeln!(session.output, "{e}"),
        })
    }

    fn statistics(&mut self) -> io::Result<Flow> {
        writeln!(
            self.output,
            "Type the name of a course to see details or 'back' to quit"
        )?;
        for (attribute, most_label, least_label) in OVERVIEW_LABELS {
            let (most, least) = self.controller.get_courses_maxmin(attribute);
            writeln!(self.output, "{most_label}: {most}")?;
            writeln!(self.output, "{least_label}: {least}")?;
        }

        self.sub_loop(Self::print_course_statistics)
    }

    fn print_course_statistics(&mut self, course_name: &str) -> io::Result<()> {
        let stats = match self.controller.get_course_statistics(course_name) {
            Ok(stats) => stats,
            Err(e) => return writeln!(self.output, "{e}"),
        };
        let title = self
            .controller
            .database()
            .get_course(course_name)
            .map_or_else(|| course_name.to_string(), |course| course.name.clone());

        writeln!(self.output, "{title}")?;
        writeln!(self.output, "{:<6}{:<10}{:5}", "id", "points", "completed")?;
        for standing in &stats {
            writeln!(
                self.output,
                "{:<6}{:<10}{:<5}",
                standing.student_id,
                standing.points,
                standing.completion_label()
            )?;
        }
        Ok(())
    }

    fn notify(&mut self) -> io::Result<Flow> {
        let notifications = self.controller.get_new_notifications();
        for notification in &notifications {
            for message in &notification.messages {
                writeln!(self.output, "{message}")?;
            }
        }
        writeln!(
            self.output,
            "Total {} students have been notified.",
            notifications.len()
        )?;
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use progress_tracker::DEFAULT_BANNER;

    fn transcript(input: &str) -> String {
        let mut output = Vec::new();
        let mut session = Session::new(Controller::default(), input.as_bytes(), &mut output, "");
        session.run(DEFAULT_BANNER).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_exit_immediately() {
        assert_eq!(transcript("exit\n"), "Learning progress tracker\nBye!\n");
    }

    #[test]
    fn test_end_of_input_ends_session() {
        assert_eq!(
            transcript("list\n"),
            "Learning progress tracker\nNo students found.\nBye!\n"
        );
    }

    #[test]
    fn test_top_level_input_errors() {
        let out = transcript("   \nback\nhello\nEXIT\n");
        assert_eq!(
            out,
            "Learning progress tracker\n\
             No Input.\n\
             Enter 'exit' to exit the program\n\
             Error: unknown command!\n\
             Bye!\n"
        );
    }

    #[test]
    fn test_add_students_reports_each_line() {
        let out = transcript(
            "add students\n\
             John Doe jd@example.com\n\
             Jane Doe JD@example.com\n\
             J Doe x@example.com\n\
             John\n\
             \n\
             Anne-Marie O'Brien am@example.com\n\
             back\n\
             list\n\
             exit\n",
        );
        assert!(out.contains("Enter student credentials or 'back' to return:\n"));
        assert_eq!(out.matches("The student has been added.").count(), 2);
        assert!(out.contains("This email is already taken.\n"));
        assert!(out.contains("Incorrect first name.\n"));
        assert!(out.contains("Incorrect credentials.\n"));
        assert!(out.contains("No Input.\n"));
        assert!(out.contains("Total 2 students have been added.\n"));
        assert!(out.contains("Students:\n1\n2\n"));
    }

    #[test]
    fn test_points_find_statistics_and_notify() {
        let out = transcript(
            "add students\n\
             Jane Roe jr@example.com\n\
             back\n\
             add points\n\
             1 600 0 0 0\n\
             2 1 1 1 1\n\
             1 1 1\n\
             1 a 1 1 1\n\
             back\n\
             find\n\
             1\n\
             x\n\
             back\n\
             statistics\n\
             python\n\
             java\n\
             back\n\
             notify\n\
             notify\n\
             exit\n",
        );

        assert_eq!(out.matches("Points updated.").count(), 1);
        assert!(out.contains("No student is found for id=2\n"));
        assert_eq!(out.matches("Incorrect points format.").count(), 2);
        assert!(out.contains("1 points: Python=600; DSA=0; Databases=0; Flask=0\n"));
        assert!(out.contains("No student is found for id=x\n"));

        assert!(out.contains(
            "Most popular: Python\n\
             Least popular: N/A\n\
             Highest activity: Python, DSA, Databases, Flask\n\
             Lowest activity: N/A\n\
             Easiest course: Python\n\
             Hardest course: N/A\n"
        ));
        assert!(out.contains("Python\nid    points    completed\n1     600       100.0%\n"));
        assert!(out.contains("Unknown course.\n"));

        assert!(out.contains(
            "To: jr@example.com\n\
             Re: Your Learning Progress\n\
             Hello, Jane Roe! You have accomplished our Python course!\n\
             Total 1 students have been notified.\n"
        ));
        assert!(out.contains("Total 0 students have been notified.\n"));
    }

    #[test]
    fn test_statistics_on_empty_tracker() {
        let out = transcript("statistics\nback\nexit\n");
        assert!(out.contains("Most popular: n/a\nLeast popular: n/a\n"));
        assert!(out.contains("Easiest course: n/a\nHardest course: n/a\n"));
    }

    #[test]
    fn test_prompt_is_printed_before_reads() {
        let mut output = Vec::new();
        let mut session = Session::new(Controller::default(), "exit\n".as_bytes(), &mut output, "> ");
        session.run("").unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "> Bye!\n");
    }

    #[test]
    fn test_command_names_round_trip() {
        for name in ["exit", "add students", "list", "add points", "find", "statistics", "notify"] {
            let command: TrackerCommand = name.parse().unwrap();
            assert_eq!(command.to_string(), name);
        }
        assert!("add".parse::<TrackerCommand>().is_err());
    }
}
