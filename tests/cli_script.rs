use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::str::contains;

fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("expense_tracker_cli").unwrap();
    cmd.env("EXPENSE_TRACKER_HOME", home.path())
        .env("EXPENSE_TRACKER_CLI_SCRIPT", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn script_mode_runs_basic_flow() {
    let home = TempDir::new().unwrap();
    let input = "add 2024-01-01 Food 10 \"fish and chips\"\nadd 2024-01-03 Rent 100 January\nlist\nreport\nexit\n";

    cli(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Expense added successfully! (#1)"))
        .stdout(contains("fish and chips"))
        .stdout(contains("Expense Distribution by Category"))
        .stdout(contains("Total: 110.00 USD"));

    home.child("expenses.csv").assert(
        "Date,Category,Amount,Description\n2024-01-01,Food,10,fish and chips\n2024-01-03,Rent,100,January\n",
    );
    home.child("categories.txt")
        .assert("Food\nRent\nEntertainment\nUtilities\n");
}

#[test]
fn validation_errors_are_reported_without_writing() {
    let home = TempDir::new().unwrap();

    cli(&home)
        .write_stdin("add 2024-01-01 Food ten lunch\nadd-category Food\n")
        .assert()
        .success()
        .stdout(contains("Amount must be a number!"))
        .stdout(contains("Category already exists!"));

    home.child("expenses.csv")
        .assert("Date,Category,Amount,Description\n");
}

#[test]
fn update_show_and_delete_by_id() {
    let home = TempDir::new().unwrap();
    let input = "\
add 2024-01-01 Food 10 lunch
add 2024-01-02 Food 4 coffee
update 2 Entertainment 15 concert
show 2
delete 1
delete 7
";

    cli(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Expense #2 updated successfully!"))
        .stdout(contains("concert"))
        .stdout(contains("Expense #1 deleted successfully!"))
        .stdout(contains("No expense with id 7"));

    home.child("expenses.csv").assert(
        "Date,Category,Amount,Description\n2024-01-02,Entertainment,15,concert\n",
    );
}

#[test]
fn unknown_command_gets_a_suggestion() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .write_stdin("lsit\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `lsit`"))
        .stdout(contains("Did you mean `list`?"));
}

#[test]
fn empty_report_says_so() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .write_stdin("report\n")
        .assert()
        .success()
        .stdout(contains("No expenses to report."));
}

#[test]
fn unlisted_category_triggers_a_warning() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .write_stdin("add 2024-05-05 Pets 30 \"dog food\"\n")
        .assert()
        .success()
        .stdout(contains("Category `Pets` is not in the category list"));
}

#[test]
fn rejected_ledger_location_does_not_break_next_start() {
    let home = TempDir::new().unwrap();
    home.child("blocker").write_str("plain file").unwrap();

    cli(&home)
        .write_stdin("config set ledger_file blocker/ledger.csv\n")
        .assert()
        .success()
        .stdout(contains("Command failed"));

    cli(&home)
        .write_stdin("add 2024-01-01 Food 2 tea\n")
        .assert()
        .success()
        .stdout(contains("Expense added successfully! (#1)"));
}
