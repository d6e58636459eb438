use crate::core::{FilterCriteria, TimestampFormat};
use crate::utils::error::Result;
use crate::utils::validation::is_valid_district;
use chrono::NaiveDateTime;
use std::io::{BufRead, Write};

/// Console question/answer loop. Each value prompt accepts at most
/// `max_attempts` answers before giving up on it.
pub struct Prompter<R: BufRead, W: Write> {
    input: R,
    output: W,
    max_attempts: u32,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W, max_attempts: u32) -> Self {
        Self {
            input,
            output,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// `None` once stdin is exhausted.
    fn read_answer(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        self.output.flush()?;
        Ok(())
    }

    /// Only `y` (any case) counts as yes.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        self.say(question)?;
        Ok(matches!(self.read_answer()?, Some(answer) if answer.eq_ignore_ascii_case("y")))
    }

    fn ask_until_valid<T>(
        &mut self,
        question: &str,
        complaint: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<Option<T>> {
        for attempt in 1..=self.max_attempts {
            self.say(question)?;
            let Some(answer) = self.read_answer()? else {
                return Ok(None);
            };
            if let Some(value) = parse(&answer) {
                return Ok(Some(value));
            }
            tracing::debug!("Rejected answer {:?} (attempt {})", answer, attempt);
            self.say(complaint)?;
        }

        tracing::warn!("No valid answer after {} attempts", self.max_attempts);
        self.say("Too many invalid attempts, keeping the default.")?;
        Ok(None)
    }

    pub fn ask_district(&mut self) -> Result<Option<String>> {
        self.ask_until_valid("Enter district:", "District has invalid format.", |answer| {
            is_valid_district(answer).then(|| answer.to_string())
        })
    }

    pub fn ask_start(
        &mut self,
        format: &TimestampFormat,
        example: &NaiveDateTime,
    ) -> Result<Option<NaiveDateTime>> {
        let question = format!(
            "Enter date and time ({}, e.g. {}):",
            format.pattern(),
            format.format(example)
        );
        self.ask_until_valid(
            &question,
            "Date and time have invalid format.",
            |answer| format.parse_exact(answer),
        )
    }
}

/// Which values still need asking; a `Some` means the value is fixed already.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub district: Option<String>,
    pub start: Option<NaiveDateTime>,
}

/// Asks the two yes/no questions and, when confirmed, the value itself.
/// Anything not answered keeps `default_district` / `now`. A console error
/// only costs the value being asked at that moment.
pub fn collect_criteria<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    default_district: &str,
    now: NaiveDateTime,
    format: &TimestampFormat,
    overrides: Overrides,
) -> FilterCriteria {
    let district = match overrides.district {
        Some(district) => district,
        None => {
            let question = format!("Change district? default: {} (y/n)", default_district);
            let chosen = ask_if_confirmed(prompter, &question, |p| p.ask_district());
            chosen.unwrap_or_else(|| default_district.to_string())
        }
    };

    let start = match overrides.start {
        Some(start) => start,
        None => {
            let chosen = ask_if_confirmed(prompter, "Change date and time? default: now (y/n)", |p| {
                p.ask_start(format, &now)
            });
            chosen.unwrap_or(now)
        }
    };

    FilterCriteria { district, start }
}

fn ask_if_confirmed<R: BufRead, W: Write, T>(
    prompter: &mut Prompter<R, W>,
    question: &str,
    ask: impl FnOnce(&mut Prompter<R, W>) -> Result<Option<T>>,
) -> Option<T> {
    let answer = match prompter.confirm(question) {
        Ok(true) => ask(prompter),
        Ok(false) => Ok(None),
        Err(e) => Err(e),
    };
    answer.unwrap_or_else(|e| {
        tracing::warn!("Console input failed, keeping the default: {}", e);
        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn now() -> NaiveDateTime {
        TimestampFormat::default()
            .parse_exact("2024-06-01 12:00:00")
            .unwrap()
    }

    fn run(input: &str, attempts: u32) -> (FilterCriteria, String) {
        let mut prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), attempts);
        let criteria = collect_criteria(
            &mut prompter,
            "district1",
            now(),
            &TimestampFormat::default(),
            Overrides::default(),
        );
        let output = String::from_utf8(prompter.into_output()).unwrap();
        (criteria, output)
    }

    #[test]
    fn test_declining_keeps_defaults() {
        let (criteria, output) = run("n\nn\n", 3);

        assert_eq!(criteria.district, "district1");
        assert_eq!(criteria.start, now());
        assert!(output.contains("Change district? default: district1 (y/n)"));
        assert!(output.contains("Change date and time? default: now (y/n)"));
        assert!(!output.contains("Enter district:"));
    }

    #[test]
    fn test_accepting_reads_values() {
        let (criteria, _) = run("y\ndistrict5\nY\n2024-01-01 09:45:00\n", 3);

        assert_eq!(criteria.district, "district5");
        assert_eq!(
            criteria.start,
            TimestampFormat::default()
                .parse_exact("2024-01-01 09:45:00")
                .unwrap()
        );
    }

    #[test]
    fn test_invalid_answers_are_reprompted() {
        let (criteria, output) = run("y\nnorth\nDistrict2\ndistrict2\ny\n2024-1-1 9:45\n2024-01-01 09:45:00\n", 3);

        assert_eq!(criteria.district, "district2");
        assert_eq!(output.matches("District has invalid format.").count(), 2);
        assert_eq!(output.matches("Date and time have invalid format.").count(), 1);
    }

    #[test]
    fn test_attempt_limit_falls_back_to_default() {
        let (criteria, output) = run("y\nx\ny\nz\nn\n", 2);

        assert_eq!(criteria.district, "district1");
        assert!(output.contains("Too many invalid attempts, keeping the default."));
        assert_eq!(criteria.start, now());
    }

    #[test]
    fn test_end_of_input_keeps_defaults() {
        let (criteria, _) = run("y\n", 3);

        assert_eq!(criteria.district, "district1");
        assert_eq!(criteria.start, now());
    }

    #[test]
    fn test_overrides_skip_questions() {
        let mut prompter = Prompter::new(Cursor::new(Vec::new()), Vec::new(), 3);
        let fixed = TimestampFormat::default()
            .parse_exact("2024-01-01 10:00:00")
            .unwrap();

        let criteria = collect_criteria(
            &mut prompter,
            "district1",
            now(),
            &TimestampFormat::default(),
            Overrides {
                district: Some("district3".to_string()),
                start: Some(fixed),
            },
        );

        assert_eq!(criteria.district, "district3");
        assert_eq!(criteria.start, fixed);
        assert!(prompter.into_output().is_empty());
    }

    #[test]
    fn test_broken_input_keeps_answers_already_given() {
        let input = b"y\ndistrict5\ny\n\xff\xfe\n".to_vec();
        let mut prompter = Prompter::new(Cursor::new(input), Vec::new(), 3);

        let criteria = collect_criteria(
            &mut prompter,
            "district1",
            now(),
            &TimestampFormat::default(),
            Overrides::default(),
        );

        assert_eq!(criteria.district, "district5");
        assert_eq!(criteria.start, now());
    }
}
