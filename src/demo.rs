//! Save/load walkthrough
//!
//! Exercises the save system end to end: one file per format under the
//! persistent data directory, reload checks, and an external mutation of a
//! slot's data. Run by the binary through the scheduler.

use crate::save::{DataType, SaveDirectory, SaveError, SaveManager, SaveSlot};

/// What the scheduled tasks operate on
pub struct DemoContext {
    pub manager: SaveManager,
    pub slot: SaveSlot,
}

impl DemoContext {
    pub fn new(manager: SaveManager, slot: SaveSlot) -> Self {
        DemoContext { manager, slot }
    }

    /// Starts the slot against the manager
    pub fn start(&mut self) -> Result<(), SaveError> {
        self.slot.start(&mut self.manager)
    }
}

/// Values read back after each reload
#[derive(Debug, Clone, PartialEq)]
pub struct WalkthroughReport {
    pub binary_had_string: bool,
    pub delete_confirmed: bool,
    pub defaults: (i32, f32, String),
    pub xml_had_defaults: bool,
    pub blanks: (i32, f32, String),
    pub json_had_blanks: bool,
}

/// Writes `saveLoadTest.bytes`, `.xml` and `.json`, reloading each
///
/// Restores the default file name afterwards; the data type is left at JSON.
pub fn run_save_load_test(context: &mut DemoContext) -> Result<WalkthroughReport, SaveError> {
    let manager = &mut context.manager;
    let slot = &mut context.slot;
    let name = slot.name().to_string();

    manager.set_default_path(SaveDirectory::PersistentDataPath);
    manager.set_default_file_name("saveLoadTest");
    manager.set_default_data_type(DataType::Binary);

    manager.register_save_data(&name, slot.save_data_mut(), true);

    {
        let mut data = slot.save_data().borrow_mut();
        data.set_int("i_test_7", 7);
        data.set_float("f_test_4.2", 4.2);
        data.set_string("s_test_helloWorld", "helloWorld");
    }

    manager.save(&name, "", true)?;
    slot.save_data().borrow_mut().delete_all();

    // Load without taking the result, then re-register to pick it up
    manager.load(&name, "")?;
    manager.register_save_data(&name, slot.save_data_mut(), false);

    let binary_had_string = slot.save_data().borrow().has_key("s_test_helloWorld");
    if binary_had_string {
        log::info!("helloWorld");
    }

    slot.save_data().borrow_mut().delete_key("s_test_helloWorld");
    let delete_confirmed = !slot.save_data().borrow().has_key("s_test_helloWorld");
    if delete_confirmed {
        log::info!("goodbye!");
    }

    let defaults = {
        let mut data = slot.save_data().borrow_mut();
        data.delete_all();
        (
            data.get_int("i_test_5", 5)?,
            data.get_float("f_test_6.3", 6.3)?,
            data.get_string("s_test_whatNow", "whatNow")?,
        )
    };

    manager.set_default_data_type(DataType::Xml);
    manager.save(&name, "", true)?;
    slot.save_data().borrow_mut().delete_all();
    slot.load(manager)?;

    let xml_had_defaults = slot.save_data().borrow().has_key("i_test_5");
    if xml_had_defaults {
        log::info!("i: {}, f: {}, s: {}", defaults.0, defaults.1, defaults.2);
    }

    let blanks = {
        let mut data = slot.save_data().borrow_mut();
        let s = data.get_string_or_empty("s_test_null")?;
        let i = data.get_int_or_zero("i_test_null")?;
        let f = data.get_float_or_zero("f_test_null")?;
        (i, f, s)
    };
    if slot.save_data().borrow().has_key("s_test_null") {
        log::info!("i: {}, f: {}, s: {}", blanks.0, blanks.1, blanks.2);
    }

    manager.set_default_data_type(DataType::Json);
    manager.save(&name, "", true)?;
    slot.save_data().borrow_mut().delete_all();
    slot.load(manager)?;

    let json_had_blanks = {
        let data = slot.save_data().borrow();
        data.has_key("s_test_null") && data.has_key("i_test_5")
    };

    manager.set_default_file_name("save");

    Ok(WalkthroughReport {
        binary_had_string,
        delete_confirmed,
        defaults,
        xml_had_defaults,
        blanks,
        json_had_blanks,
    })
}

/// Sets a string on the slot from outside, then saves and reloads it
pub fn set_save_data_property_test(context: &mut DemoContext) -> Result<(), SaveError> {
    context
        .slot
        .save_data()
        .borrow_mut()
        .set_string("s_test_external", "testing_external");

    context.slot.save(&context.manager)?;
    context.slot.load(&mut context.manager)?;
    Ok(())
}
