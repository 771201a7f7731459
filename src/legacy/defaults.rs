//! Factory defaults for a freshly installed system.
//!
//! [`ConfigRecord::new_system`] reproduces the record the stock WWIV 4.x
//! installer wrote before the sysop changed anything: the SYSOP password,
//! the standard directory tree, Hayes modem strings, the DOS com port
//! tables, and the graduated security level ladder.

use crate::legacy::layout::{ARCHIVER_SLOTS, AUTOVAL_SLOTS, SECURITY_LEVEL_COUNT};
use crate::legacy::record::{
    ArchiverRecord, ConfigRecord, SecurityLevel, ValidationRecord, ABILITY_COSYSOP,
    ABILITY_EMAIL_ANONY, ABILITY_LIMITED_COSYSOP, ABILITY_POST_ANONY, ABILITY_READ_EMAIL_ANONY,
    ABILITY_READ_POST_ANONY,
};
use crate::legacy::restrict::RESTRICT_VALIDATE;

/// Size of one record in the stock user file.
const USER_RECORD_LEN: i16 = 1024;
/// Offset of the mail-waiting counter in a stock user record.
const USER_WAITING_OFFSET: i16 = 628;
/// Offset of the inactive flag in a stock user record.
const USER_INACT_OFFSET: i16 = 576;
/// Offset of the status word in a stock user record.
const USER_SYSSTATUS_OFFSET: i16 = 800;
/// Offset of the forward-to user number in a stock user record.
const USER_FORWARD_USER_OFFSET: i16 = 688;
/// Offset of the forward-to system number in a stock user record.
const USER_FORWARD_SYSTEM_OFFSET: i16 = 690;
/// Offset of the forward-to network number in a stock user record.
const USER_NET_NUM_OFFSET: i16 = 692;

/// Builds the graduated per-level defaults: every ten levels buys more
/// time and messages, the anonymous and co-sysop abilities switch on at
/// fixed thresholds, and level 255 is uncapped.
fn security_ladder() -> [SecurityLevel; SECURITY_LEVEL_COUNT] {
    let mut table = [SecurityLevel::default(); SECURITY_LEVEL_COUNT];
    for (i, level) in table.iter_mut().enumerate() {
        let tier = (i / 10) as u16;
        level.time_per_logon = tier * 10;
        level.time_per_day = (f32::from(level.time_per_logon) * 2.5) as u16;
        level.messages_read = tier * 100;
        level.emails = match i {
            0..=9 => 0,
            10..=19 => 5,
            _ => 20,
        };
        level.posts = match i {
            0..=25 => 10,
            26..=39 => 4,
            40..=79 => 10,
            _ => 25,
        };
        let mut ability = 0;
        if i >= 150 {
            ability |= ABILITY_COSYSOP;
        }
        if i >= 100 {
            ability |= ABILITY_LIMITED_COSYSOP;
        }
        if i >= 90 {
            ability |= ABILITY_READ_EMAIL_ANONY;
        }
        if i >= 80 {
            ability |= ABILITY_READ_POST_ANONY;
        }
        if i >= 70 {
            ability |= ABILITY_EMAIL_ANONY;
        }
        if i >= 60 {
            ability |= ABILITY_POST_ANONY;
        }
        level.ability = ability;
        if i == 255 {
            level.time_per_logon = 255;
            level.time_per_day = 255;
            level.posts = 255;
            level.emails = 255;
        }
    }
    table
}

impl ConfigRecord {
    /// The record a fresh installation writes before the sysop edits
    /// anything.
    ///
    /// Directory paths are relative DOS paths; the stock installer embedded
    /// the install directory chosen at setup time, which a factory record
    /// does not have. Only the ZIP archiver slot is populated; the other
    /// three were always sysop-configured.
    pub fn new_system() -> Self {
        let max_subs: u16 = 64;
        let max_dirs: u16 = 64;
        // One 32-bit pointer plus one per sub, plus one changed-bit word
        // per 32 subs and dirs.
        let qscan_len = 4 * (1 + max_subs + (max_subs + 31) / 32 + (max_dirs + 31) / 32);

        let mut arcs: [ArchiverRecord; ARCHIVER_SLOTS] = Default::default();
        arcs[0] = ArchiverRecord {
            extension: "ZIP".to_string(),
            add_command: "PKZIP %1 %2".to_string(),
            extract_command: "PKUNZIP %1 %2".to_string(),
            list_command: "PKUNZIP -v %1".to_string(),
        };

        ConfigRecord {
            system_password: "SYSOP".to_string(),
            msgs_dir: "msgs\\".to_string(),
            gfiles_dir: "gfiles\\".to_string(),
            data_dir: "data\\".to_string(),
            dloads_dir: "dloads\\".to_string(),
            temp_dir: "temp1\\".to_string(),
            xmark: 0xFF,
            modem_init: "ATS0=0M0Q0V0E0S2=1S7=20H0{".to_string(),
            modem_answer: "ATA{".to_string(),
            connect_300: "1".to_string(),
            connect_1200: "5".to_string(),
            connect_2400: "10".to_string(),
            connect_9600: "13".to_string(),
            connect_19200: "50".to_string(),
            no_carrier: "3".to_string(),
            ring: "2".to_string(),
            system_name: "My WWIV BBS".to_string(),
            system_phone: "   -   -    ".to_string(),
            sysop_name: "The New Sysop".to_string(),
            new_user_sl: 10,
            max_waiting: 50,
            com_port: [0, 1, 0, 0, 0],
            com_isr: [0, 4, 3, 4, 3],
            primary_port: 1,
            baud_rate: [300; 5],
            com_base: [0, 0x3F8, 0x2F8, 0x3E8, 0x2E8],
            max_users: 500,
            new_user_restrict: RESTRICT_VALIDATE,
            new_user_gold: 100.0,
            sl: security_ladder(),
            autoval: [ValidationRecord {
                sl: 10,
                dsl: 0,
                ar: 0,
                dar: 0,
                restrict: 0,
            }; AUTOVAL_SLOTS],
            hangup_phone: "ATH0{".to_string(),
            pickup_phone: "ATH1{".to_string(),
            arcs,
            user_rec_len: USER_RECORD_LEN,
            waiting_offset: USER_WAITING_OFFSET,
            inact_offset: USER_INACT_OFFSET,
            dial_prefix: "ATDT".to_string(),
            modem_type: "H2400".to_string(),
            batch_dir: "temp1\\".to_string(),
            sysstatus_offset: USER_SYSSTATUS_OFFSET,
            fu_offset: USER_FORWARD_USER_OFFSET,
            fs_offset: USER_FORWARD_SYSTEM_OFFSET,
            fn_offset: USER_NET_NUM_OFFSET,
            max_subs,
            max_dirs,
            qscan_len,
            menu_dir: "gfiles\\menus\\".to_string(),
            ..Default::default()
        }
    }
}
