mod common;

use common::TestHome;
use predicates::prelude::*;
use predicates::str::contains;

#[test]
fn first_run_prompts_for_balance_and_persists_on_exit() {
    let home = TestHome::new();
    home.command()
        .write_stdin("1000\nadd meal breakfast -50, salary june 3000\nview\nexit\n")
        .assert()
        .success()
        .stdout(contains("How much money do you have?"))
        .stdout(contains("Added 2 record(s)."))
        .stdout(contains("Now you have 3950 dollars."))
        .stdout(contains("Goodbye!"));

    assert_eq!(
        home.read_records(),
        "1000\nmeal breakfast -50\nsalary june 3000\n"
    );
}

#[test]
fn second_run_welcomes_back() {
    let home = TestHome::new();
    home.command()
        .write_stdin("200\nadd bus ticket -30\nexit\n")
        .assert()
        .success();

    home.command()
        .write_stdin("view\nexit\n")
        .assert()
        .success()
        .stdout(contains("Welcome back!"))
        .stdout(contains("ticket"))
        .stdout(contains("Now you have 170 dollars."));
}

#[test]
fn malformed_entry_rejects_whole_batch() {
    let home = TestHome::new();
    home.command()
        .write_stdin("0\nadd food bread -80, drink soda abc\nexit\n")
        .assert()
        .success()
        .stdout(contains("Entry 2: Invalid amount `abc`."))
        .stdout(contains("Added").not());

    assert_eq!(home.read_records(), "0\n");
}

#[test]
fn unknown_category_points_to_category_list() {
    let home = TestHome::new();
    home.command()
        .write_stdin("0\nadd clothing pants -100\nexit\n")
        .assert()
        .success()
        .stdout(contains("is not in the category list"))
        .stdout(contains("view categories"));

    assert_eq!(home.read_records(), "0\n");
}

#[test]
fn inline_entries_are_saved_as_typed() {
    let home = TestHome::new();
    home.command()
        .write_stdin("0\nadd snack mom's -10\nadd meal a\\b -5\nexit\n")
        .assert()
        .success()
        .stdout(contains("Added 1 record(s)."))
        .stdout(contains("missing closing quote").not());

    assert_eq!(home.read_records(), "0\nsnack mom's -10\nmeal a\\b -5\n");
}

#[test]
fn long_descriptions_are_shown_in_full() {
    let home = TestHome::new();
    home.command()
        .write_stdin("0\nadd meal dinner-with-the-whole-family -120\nview\nfind food\nexit\n")
        .assert()
        .success()
        .stdout(contains("dinner-with-the-whole-family").count(2))
        .stdout(contains("…").not());
}

#[test]
fn add_prompts_when_no_entries_given() {
    let home = TestHome::new();
    home.command()
        .write_stdin("0\nadd\nsnack chips -15\nexit\n")
        .assert()
        .success()
        .stdout(contains("separate by commas"))
        .stdout(contains("Added 1 record(s)."));

    assert_eq!(home.read_records(), "0\nsnack chips -15\n");
}

#[test]
fn delete_by_position_and_out_of_range() {
    let home = TestHome::new();
    home.write_records("1000\nmeal a -10\nfood b -5\nbus c -2\n");
    home.command()
        .write_stdin("delete 2\ndelete 10\ndelete\nzero\nexit\n")
        .assert()
        .success()
        .stdout(contains("Deleted record: food b -5"))
        .stdout(contains("Index 10 is out of range"))
        .stdout(contains("`zero` is not a number"));

    assert_eq!(home.read_records(), "1000\nmeal a -10\nbus c -2\n");
}

#[test]
fn find_reports_subtree_records_and_total() {
    let home = TestHome::new();
    home.write_records("0\nmeal x -10\nbus y -5\nfood w -1\nsalary s 100\n");
    home.command()
        .write_stdin("find food\nexit\n")
        .assert()
        .success()
        .stdout(contains("Here are records under category \"food\":"))
        .stdout(contains("The total amount above is -11."))
        .stdout(contains("salary").not());
}

#[test]
fn find_on_leaf_excludes_other_categories() {
    let home = TestHome::new();
    home.write_records("0\nmeal x -10\nbus y -5\nmeal z -3\n");
    home.command()
        .write_stdin("find meal\nexit\n")
        .assert()
        .success()
        .stdout(contains("The total amount above is -13."))
        .stdout(contains("bus").not());
}

#[test]
fn find_unknown_category_is_an_error() {
    let home = TestHome::new();
    home.command()
        .write_stdin("0\nfind\nclothing\nexit\n")
        .assert()
        .success()
        .stdout(contains("Which category do you want to find?"))
        .stdout(contains("Category `clothing` not found."));
}

#[test]
fn view_categories_prints_indented_tree() {
    let home = TestHome::new();
    home.command()
        .write_stdin("0\nview categories\nexit\n")
        .assert()
        .success()
        .stdout(contains("- expense\n  - food\n    - meal"))
        .stdout(contains("    - railway\n- income"));
}

#[test]
fn unknown_command_reprompts() {
    let home = TestHome::new();
    home.command()
        .write_stdin("0\ndance\nveiw\nexit\n")
        .assert()
        .success()
        .stdout(contains("Invalid command `dance`"))
        .stdout(contains("Did you mean `view`?"))
        .stdout(contains("Goodbye!"));
}

#[test]
fn malformed_records_file_is_reset() {
    let home = TestHome::new();
    home.write_records("1000\nmeal breakfast -50\nbroken line here too\n");
    home.command()
        .write_stdin("50\nexit\n")
        .assert()
        .success()
        .stdout(contains("Invalid format in records file"))
        .stdout(contains("How much money do you have?"));

    assert_eq!(home.read_records(), "50\n");
}

#[test]
fn invalid_balance_defaults_to_zero() {
    let home = TestHome::new();
    home.command()
        .write_stdin("plenty\nexit\n")
        .assert()
        .success()
        .stdout(contains("Set to 0 by default."));

    assert_eq!(home.read_records(), "0\n");
}

#[test]
fn end_of_input_saves_like_exit() {
    let home = TestHome::new();
    home.command()
        .write_stdin("10\nadd bonus year-end 5\n")
        .assert()
        .success()
        .stdout(contains("Goodbye!"));

    assert_eq!(home.read_records(), "10\nbonus year-end 5\n");
}

#[test]
fn help_describes_a_command() {
    let home = TestHome::new();
    home.command()
        .write_stdin("0\nhelp\nhelp find\nexit\n")
        .assert()
        .success()
        .stdout(contains("Available commands"))
        .stdout(contains("Usage: find [category]"));
}

#[test]
fn configured_taxonomy_and_plain_output() {
    let home = TestHome::new();
    home.write_config(
        r#"{
            "plain_output": true,
            "taxonomy": [
                { "name": "spending", "children": [{ "name": "groceries" }] },
                { "name": "earning" }
            ]
        }"#,
    );
    home.command()
        .write_stdin("0\nadd groceries apples -12\nadd meal lunch -5\nfind spending\nexit\n")
        .assert()
        .success()
        .stdout(contains("OK: Added 1 record(s)."))
        .stdout(contains("ERROR: The specified category `meal`"))
        .stdout(contains("The total amount above is -12."));

    assert_eq!(home.read_records(), "0\ngroceries apples -12\n");
}

#[test]
fn legacy_records_file_is_imported() {
    let home = TestHome::new();
    home.write_records("300\nbreakfast -50\nrefund 20\n");
    home.command()
        .write_stdin("find expense\nexit\n")
        .assert()
        .success()
        .stdout(contains("Welcome back!"))
        .stdout(contains("The total amount above is -50."));

    assert_eq!(
        home.read_records(),
        "300\nexpense breakfast -50\nincome refund 20\n"
    );
}
