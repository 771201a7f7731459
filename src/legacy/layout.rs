//! Field widths, counts, and byte offsets of the configuration record.
//!
//! The record is packed: no alignment padding anywhere, every width exactly
//! as the original DOS sources declared it. The const assertions at the
//! bottom pin the arithmetic, so a width change that would shift any later
//! field fails to compile instead of silently corrupting files.

/// Width of password fields, modem result codes, phone command templates,
/// and the dial prefix.
pub const PASSWORD_WIDTH: usize = 21;

/// Width of directory path fields.
pub const PATH_WIDTH: usize = 81;

/// Width of the registration code field.
pub const REG_CODE_WIDTH: usize = 83;

/// Width of external command lines, the system name, and the sysop name.
pub const COMMAND_WIDTH: usize = 51;

/// Width of the system phone number field.
pub const PHONE_WIDTH: usize = 13;

/// Width of the modem type identifier.
pub const MODEM_TYPE_WIDTH: usize = 9;

/// Width of an archiver file extension.
pub const ARC_EXTENSION_WIDTH: usize = 4;

/// Width of an archiver command line.
pub const ARC_COMMAND_WIDTH: usize = 32;

/// Length of the reserved trailing region.
pub const RESERVED_LEN: usize = 400;

/// Number of com port slots (slot 0 is unused in the original tables).
pub const COM_PORT_SLOTS: usize = 5;

/// Number of security level entries, one per level 0-255.
pub const SECURITY_LEVEL_COUNT: usize = 256;

/// Number of auto-validation slots.
pub const AUTOVAL_SLOTS: usize = 10;

/// Number of archiver slots.
pub const ARCHIVER_SLOTS: usize = 4;

/// Encoded length of one security level entry: five u16 counters plus a
/// 32-bit ability mask.
pub const SECURITY_LEVEL_LEN: usize = 5 * 2 + 4;

/// Encoded length of one auto-validation entry: two u8 levels plus three
/// u16 masks.
pub const VALIDATION_RECORD_LEN: usize = 2 * 1 + 3 * 2;

/// Encoded length of one archiver entry: extension plus three commands.
pub const ARCHIVER_RECORD_LEN: usize = ARC_EXTENSION_WIDTH + 3 * ARC_COMMAND_WIDTH;

/// Total encoded length of the configuration record, summed in field order.
pub const CONFIG_RECORD_LEN: usize = 2 * PASSWORD_WIDTH // new user + system passwords
    + 4 * PATH_WIDTH // msgs, gfiles, data, dloads dirs
    + 1 // ram_drive
    + PATH_WIDTH // temp_dir
    + 1 // xmark
    + REG_CODE_WIDTH // reg_code
    + COMMAND_WIDTH // modem_init
    + 9 * PASSWORD_WIDTH // modem_answer, connect 300..19200, no_carrier, ring, terminal_command
    + COMMAND_WIDTH // system_name
    + PHONE_WIDTH // system_phone
    + 2 * COMMAND_WIDTH // sysop_name, execute_command
    + 3 // new_user_sl, new_user_dsl, max_waiting
    + 2 * COM_PORT_SLOTS // com_port, com_isr
    + 3 // primary_port, new_uploads_dir, closed_system
    + 2 // system_number
    + 2 * 2 * COM_PORT_SLOTS // baud_rate, com_base
    + 6 * 2 // max_users .. execute_time
    + 2 * 4 // req_ratio, new_user_gold
    + SECURITY_LEVEL_COUNT * SECURITY_LEVEL_LEN // sl
    + AUTOVAL_SLOTS * VALIDATION_RECORD_LEN // autoval
    + 2 * PASSWORD_WIDTH // hangup_phone, pickup_phone
    + 2 * 2 // net_low_time, net_high_time
    + 5 * PASSWORD_WIDTH // alternate connect strings
    + ARCHIVER_SLOTS * ARCHIVER_RECORD_LEN // arcs
    + 2 * COMMAND_WIDTH // beginday_command, logon_command
    + 3 * 2 // user_rec_len, waiting_offset, inact_offset
    + COMMAND_WIDTH // newuser_command
    + 4 // wwiv_reg_number
    + PASSWORD_WIDTH // dial_prefix
    + 4 // post_call_ratio
    + COMMAND_WIDTH // upload_command
    + PATH_WIDTH // dsz_batch_dl
    + MODEM_TYPE_WIDTH // modem_type
    + PATH_WIDTH // batch_dir
    + 2 // sysstatus_offset
    + 1 // network_type
    + 3 * 2 // fu_offset, fs_offset, fn_offset
    + 3 * 2 // max_subs, max_dirs, qscan_len
    + 1 // email_storage_type
    + 2 * 4 // sysconfig1, rrd
    + PATH_WIDTH // menu_dir
    + 2 * COMMAND_WIDTH // logoff_command, vscan_command
    + RESERVED_LEN; // reserved

/// Byte offset of the new-user security level field.
pub const NEW_USER_SL_OFFSET: usize = 938;

/// Byte offset of the system (network node) number.
pub const SYSTEM_NUMBER_OFFSET: usize = 954;

/// Byte offset of the upload/download ratio requirement.
pub const REQ_RATIO_OFFSET: usize = 988;

/// Byte offset of the security level table.
pub const SL_TABLE_OFFSET: usize = 996;

/// Byte offset of the auto-validation table.
pub const AUTOVAL_OFFSET: usize = 4580;

/// Byte offset of the archiver table.
pub const ARCS_OFFSET: usize = 4811;

/// Byte offset of the registration number.
pub const WWIV_REG_NUMBER_OFFSET: usize = 5370;

/// Byte offset of the quick-scan pointer length.
pub const QSCAN_LEN_OFFSET: usize = 5634;

/// Byte offset of the reserved trailing region.
pub const RESERVED_OFFSET: usize = 5828;

const _: () = assert!(SECURITY_LEVEL_LEN == 14);
const _: () = assert!(VALIDATION_RECORD_LEN == 8);
const _: () = assert!(ARCHIVER_RECORD_LEN == 100);
const _: () = assert!(CONFIG_RECORD_LEN == 6228);
const _: () = assert!(SL_TABLE_OFFSET + SECURITY_LEVEL_COUNT * SECURITY_LEVEL_LEN == AUTOVAL_OFFSET);
const _: () = assert!(ARCS_OFFSET + ARCHIVER_SLOTS * ARCHIVER_RECORD_LEN + 2 * COMMAND_WIDTH + 3 * 2 + COMMAND_WIDTH == WWIV_REG_NUMBER_OFFSET);
const _: () = assert!(RESERVED_OFFSET + RESERVED_LEN == CONFIG_RECORD_LEN);
