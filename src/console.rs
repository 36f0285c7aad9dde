// 🖥️ Operator console - numeric menu over a MemberRegistry
//
// Reads whole lines from any BufRead and writes to any Write, so the same
// loop drives stdin/stdout in the binary and byte buffers in tests.
// End of input at any prompt ends the session.

use crate::config::RegistryConfig;
use crate::member::{Member, MemberDetails, MemberId};
use crate::registry::MemberRegistry;
use crate::validation::{self, InvalidField};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::info;

/// Full-screen viewer invoked from the menu with the current member list.
pub type Browser = Box<dyn FnMut(&[Member]) -> Result<()>>;

const TABLE_RULE_WIDTH: usize = 85;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Prompt text for one pass over the four member fields.
struct DetailPrompts {
    name: &'static str,
    age: &'static str,
    phone: &'static str,
    membership_type: &'static str,
}

const ADD_PROMPTS: DetailPrompts = DetailPrompts {
    name: "Enter Member Name: ",
    age: "Enter Age: ",
    phone: "Enter Phone Number (10 digits): ",
    membership_type: "Enter Membership Type: ",
};

const UPDATE_PROMPTS: DetailPrompts = DetailPrompts {
    name: "Enter New Name: ",
    age: "Enter New Age: ",
    phone: "Enter New Phone Number (10 digits): ",
    membership_type: "Enter New Membership Type: ",
};

pub struct Console<R, W> {
    input: R,
    output: W,
    registry: MemberRegistry,
    config: RegistryConfig,
    browser: Option<Browser>,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, config: RegistryConfig) -> Self {
        Self {
            input,
            output,
            registry: MemberRegistry::new(),
            config,
            browser: None,
        }
    }

    /// Attach a browser; the menu then offers "6. Browse Members".
    pub fn with_browser(mut self, browser: Browser) -> Self {
        self.browser = Some(browser);
        self
    }

    pub fn into_parts(self) -> (MemberRegistry, W) {
        (self.registry, self.output)
    }

    /// Run the menu until the operator exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        info!("session started");

        loop {
            self.print_menu()?;
            let Some(line) = self.read_line("Enter your choice: ")? else {
                break;
            };

            let flow = match line.trim().parse::<u32>() {
                Ok(1) => self.add_member()?,
                Ok(2) => self.view_members()?,
                Ok(3) => self.update_member()?,
                Ok(4) => self.delete_member()?,
                Ok(5) => {
                    writeln!(self.output, "Exiting system...")?;
                    Flow::Quit
                }
                Ok(6) if self.browser.is_some() => self.browse_members()?,
                _ => {
                    writeln!(self.output, "Invalid choice. Try again.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Quit {
                break;
            }
        }

        self.output.flush()?;
        info!(members = self.registry.len(), "session ended");
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- Gym Membership Management System ---")?;
        writeln!(self.output, "1. Add New Member")?;
        writeln!(self.output, "2. View All Members")?;
        writeln!(self.output, "3. Update Member Details")?;
        writeln!(self.output, "4. Delete Member")?;
        writeln!(self.output, "5. Exit")?;
        if self.browser.is_some() {
            writeln!(self.output, "6. Browse Members")?;
        }
        Ok(())
    }

    // ========================================================================
    // ACTIONS
    // ========================================================================

    fn add_member(&mut self) -> Result<Flow> {
        let Some(details) = self.prompt_details(&ADD_PROMPTS)? else {
            return Ok(Flow::Quit);
        };

        let date = self.config.registration_date();
        match self.registry.add(details, date) {
            Ok(id) => writeln!(self.output, "Member added successfully with ID: {}", id)?,
            Err(err) => writeln!(self.output, "{}", err)?,
        }
        Ok(Flow::Continue)
    }

    fn view_members(&mut self) -> Result<Flow> {
        let members = self.registry.list();

        if self.config.json {
            serde_json::to_writer_pretty(&mut self.output, members)
                .context("failed to write member list as JSON")?;
            writeln!(self.output)?;
            return Ok(Flow::Continue);
        }

        if members.is_empty() {
            writeln!(self.output, "No members registered.")?;
            return Ok(Flow::Continue);
        }

        write!(self.output, "{}", format_table(members))?;
        Ok(Flow::Continue)
    }

    fn update_member(&mut self) -> Result<Flow> {
        let Some(id) = self.prompt_id("Enter Member ID to update: ")? else {
            return Ok(Flow::Quit);
        };

        if self.registry.find_by_id(id).is_none() {
            writeln!(self.output, "Member not found.")?;
            return Ok(Flow::Continue);
        }

        let Some(details) = self.prompt_details(&UPDATE_PROMPTS)? else {
            return Ok(Flow::Quit);
        };

        match self.registry.update(id, details) {
            Ok(()) => writeln!(self.output, "Member details updated successfully.")?,
            Err(err) => writeln!(self.output, "{}", err)?,
        }
        Ok(Flow::Continue)
    }

    fn delete_member(&mut self) -> Result<Flow> {
        let Some(id) = self.prompt_id("Enter Member ID to delete: ")? else {
            return Ok(Flow::Quit);
        };

        match self.registry.delete(id) {
            Ok(_) => writeln!(self.output, "Member deleted successfully.")?,
            Err(_) => writeln!(self.output, "Member not found.")?,
        }
        Ok(Flow::Continue)
    }

    fn browse_members(&mut self) -> Result<Flow> {
        if let Some(browser) = self.browser.as_mut() {
            browser(self.registry.list())?;
        }
        Ok(Flow::Continue)
    }

    // ========================================================================
    // PROMPTS
    // ========================================================================

    /// Write `prompt`, read one line without its line ending. None at EOF.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read operator input")?;
        if read == 0 {
            return Ok(None);
        }

        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    fn prompt_number(&mut self, prompt: &str) -> Result<Option<i32>> {
        loop {
            let Some(line) = self.read_line(prompt)? else {
                return Ok(None);
            };
            match line.trim().parse::<i32>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "Invalid input. Please enter a number.")?,
            }
        }
    }

    fn prompt_id(&mut self, prompt: &str) -> Result<Option<MemberId>> {
        // Negative ids map to 0, which is never assigned
        Ok(self
            .prompt_number(prompt)?
            .map(|value| MemberId::try_from(value).unwrap_or(0)))
    }

    /// Re-prompt until `valid` accepts the line.
    fn prompt_text(
        &mut self,
        prompt: &str,
        valid: fn(&str) -> bool,
        invalid: InvalidField,
    ) -> Result<Option<String>> {
        loop {
            let Some(line) = self.read_line(prompt)? else {
                return Ok(None);
            };
            if valid(&line) {
                return Ok(Some(line));
            }
            writeln!(self.output, "{}", invalid)?;
        }
    }

    fn prompt_age(&mut self, prompt: &str) -> Result<Option<i32>> {
        loop {
            let Some(age) = self.prompt_number(prompt)? else {
                return Ok(None);
            };
            if validation::validate_age(age) {
                return Ok(Some(age));
            }
            writeln!(self.output, "{}", InvalidField::Age)?;
        }
    }

    fn prompt_details(&mut self, prompts: &DetailPrompts) -> Result<Option<MemberDetails>> {
        let name = self.prompt_text(
            prompts.name,
            validation::validate_name,
            InvalidField::Name,
        )?;
        let Some(name) = name else {
            return Ok(None);
        };
        let Some(age) = self.prompt_age(prompts.age)? else {
            return Ok(None);
        };
        let phone = self.prompt_text(
            prompts.phone,
            validation::validate_phone,
            InvalidField::Phone,
        )?;
        let Some(phone) = phone else {
            return Ok(None);
        };
        let Some(membership_type) = self.read_line(prompts.membership_type)? else {
            return Ok(None);
        };

        Ok(Some(MemberDetails {
            name,
            age,
            phone,
            membership_type,
        }))
    }
}

// ============================================================================
// TABLE FORMATTING
// ============================================================================

/// Left-aligned member table: header, rule, one row per member.
pub fn format_table(members: &[Member]) -> String {
    let mut out = format!(
        "{:<10}{:<20}{:<10}{:<15}{:<15}{:<15}\n",
        "Member ID", "Name", "Age", "Phone", "Membership", "Reg. Date"
    );
    out.push_str(&"-".repeat(TABLE_RULE_WIDTH));
    out.push('\n');

    for member in members {
        out.push_str(&format!(
            "{:<10}{:<20}{:<10}{:<15}{:<15}{:<15}\n",
            member.id(),
            member.name(),
            member.age(),
            member.phone(),
            member.membership_type(),
            member.registration_date(),
        ));
    }

    out
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io::Cursor;
    use std::rc::Rc;

    fn run_script(script: &str) -> (MemberRegistry, String) {
        run_script_with(script, RegistryConfig::default())
    }

    fn run_script_with(script: &str, config: RegistryConfig) -> (MemberRegistry, String) {
        let mut console = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new(), config);
        console.run().unwrap();
        let (registry, output) = console.into_parts();
        (registry, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_exit_immediately() {
        let (registry, output) = run_script("5\n");

        assert!(registry.is_empty());
        assert!(output.contains("--- Gym Membership Management System ---"));
        assert!(output.contains("1. Add New Member"));
        assert!(output.contains("Exiting system..."));
        assert!(!output.contains("6. Browse Members"));
    }

    #[test]
    fn test_eof_ends_session() {
        let (registry, output) = run_script("");

        assert!(registry.is_empty());
        assert!(output.ends_with("Enter your choice: "));
    }

    #[test]
    fn test_eof_mid_add_adds_nothing() {
        let (registry, _) = run_script("1\nAlice\n30\n");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_invalid_choice() {
        let (_, output) = run_script("9\nabc\n5\n");
        assert_eq!(output.matches("Invalid choice. Try again.").count(), 2);
    }

    #[test]
    fn test_add_member() {
        let (registry, output) = run_script("1\nAlice\n30\n1234567890\nGold\n5\n");

        assert!(output.contains("Member added successfully with ID: 1"));
        let member = registry.find_by_id(1).unwrap();
        assert_eq!(member.name(), "Alice");
        assert_eq!(member.age(), 30);
        assert_eq!(member.phone(), "1234567890");
        assert_eq!(member.membership_type(), "Gold");
        assert_eq!(member.registration_date(), "2024-03-26");
    }

    #[test]
    fn test_add_reprompts_until_valid() {
        let script = "1\nAl1ce\nAlice\nthirty\n0\n30\n12345\n1234567890\nGold\n5\n";
        let (registry, output) = run_script(script);

        assert!(output.contains("Invalid name. Use only letters."));
        assert!(output.contains("Invalid input. Please enter a number."));
        assert!(output.contains("Invalid age. Must be between 1 and 120."));
        assert!(output.contains("Invalid phone number. Must be 10 digits."));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.find_by_id(1).unwrap().name(), "Alice");
    }

    #[test]
    fn test_add_reprompts_on_non_ascii_name() {
        let (registry, output) = run_script("1\nJosé\nJose\n41\n1234567890\nGold\n5\n");

        assert!(output.contains("Invalid name. Use only letters."));
        assert_eq!(registry.find_by_id(1).unwrap().name(), "Jose");
    }

    #[test]
    fn test_add_handles_crlf() {
        let (registry, _) = run_script("1\r\nBob Lee\r\n26\r\n0987654321\r\nSilver\r\n5\r\n");

        let member = registry.find_by_id(1).unwrap();
        assert_eq!(member.name(), "Bob Lee");
        assert_eq!(member.membership_type(), "Silver");
    }

    #[test]
    fn test_view_empty() {
        let (_, output) = run_script("2\n5\n");
        assert!(output.contains("No members registered."));
    }

    #[test]
    fn test_view_table() {
        let (_, output) = run_script("1\nAlice\n30\n1234567890\nGold\n2\n5\n");

        let header = format!(
            "{:<10}{:<20}{:<10}{:<15}{:<15}{:<15}",
            "Member ID", "Name", "Age", "Phone", "Membership", "Reg. Date"
        );
        let row = format!(
            "{:<10}{:<20}{:<10}{:<15}{:<15}{:<15}",
            1, "Alice", 30, "1234567890", "Gold", "2024-03-26"
        );
        assert!(output.contains(&header));
        assert!(output.contains(&"-".repeat(85)));
        assert!(output.contains(&row));
    }

    #[test]
    fn test_view_json() {
        let config = RegistryConfig {
            json: true,
            ..RegistryConfig::default()
        };
        let (_, output) = run_script_with("1\nAlice\n30\n1234567890\nGold\n2\n5\n", config);

        assert!(output.contains("\"name\": \"Alice\""));
        assert!(output.contains("\"registration_date\": \"2024-03-26\""));
    }

    #[test]
    fn test_update_member() {
        let script = "1\nBob\n25\n0987654321\nSilver\n3\n1\nBob Lee\n26\n0987654321\nGold\n5\n";
        let (registry, output) = run_script(script);

        assert!(output.contains("Enter New Name: "));
        assert!(output.contains("Member details updated successfully."));
        let member = registry.find_by_id(1).unwrap();
        assert_eq!(member.name(), "Bob Lee");
        assert_eq!(member.age(), 26);
        assert_eq!(member.membership_type(), "Gold");
    }

    #[test]
    fn test_update_unknown_skips_prompts() {
        let (_, output) = run_script("3\n42\n5\n");

        assert!(output.contains("Member not found."));
        assert!(!output.contains("Enter New Name: "));
    }

    #[test]
    fn test_update_non_numeric_id_reprompts() {
        let (_, output) = run_script("3\nxyz\n-1\n5\n");

        assert!(output.contains("Invalid input. Please enter a number."));
        assert!(output.contains("Member not found."));
    }

    #[test]
    fn test_delete_member() {
        let script = "1\nAlice\n30\n1234567890\nGold\n4\n1\n4\n1\n2\n5\n";
        let (registry, output) = run_script(script);

        assert!(output.contains("Member deleted successfully."));
        assert!(output.contains("Member not found."));
        assert!(output.contains("No members registered."));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_browser_receives_members() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let browser: Browser = Box::new(move |members: &[Member]| -> Result<()> {
            sink.borrow_mut().extend(members.iter().map(|m| m.id()));
            Ok(())
        });

        let script = "1\nAlice\n30\n1234567890\nGold\n6\n5\n";
        let input = Cursor::new(script.as_bytes().to_vec());
        let mut console =
            Console::new(input, Vec::new(), RegistryConfig::default()).with_browser(browser);
        console.run().unwrap();

        let (_, output) = console.into_parts();
        assert!(String::from_utf8(output).unwrap().contains("6. Browse Members"));
        assert_eq!(*seen.borrow(), vec![1]);
    }

    #[test]
    fn test_browse_without_browser_is_invalid_choice() {
        let (_, output) = run_script("6\n5\n");
        assert!(output.contains("Invalid choice. Try again."));
    }

    #[test]
    fn test_format_table_does_not_truncate_long_names() {
        let mut registry = MemberRegistry::new();
        registry
            .add(
                MemberDetails::new("Bartholomew Montgomery Smith", 52, "1234567890", "Gold"),
                "2024-03-26",
            )
            .unwrap();

        let table = format_table(registry.list());
        assert!(table.contains("Bartholomew Montgomery Smith"));
        assert_eq!(table.lines().count(), 3);
    }
}
