//! Decoded record types and the field table that defines their layout.
//!
//! [`ConfigRecord::for_each_field`] is the one place the field order of the
//! on-disk record is written down. Decoding, encoding, width validation,
//! and size audits are all [`FieldVisitor`] implementations driven by that
//! single walk, so the two codec directions cannot drift apart.

use serde::{Deserialize, Serialize};

use crate::legacy::layout::{
    ARCHIVER_SLOTS, ARC_COMMAND_WIDTH, ARC_EXTENSION_WIDTH, AUTOVAL_SLOTS, COMMAND_WIDTH,
    COM_PORT_SLOTS, MODEM_TYPE_WIDTH, PASSWORD_WIDTH, PATH_WIDTH, PHONE_WIDTH, REG_CODE_WIDTH,
    RESERVED_LEN, SECURITY_LEVEL_COUNT,
};

/// Visitor over the fields of a record, called once per field in on-disk
/// order. Implementations decide the direction: a decoder writes into the
/// `&mut` value, an encoder reads from it, an auditor just accounts for it.
pub trait FieldVisitor {
    type Error;

    fn visit_u8(&mut self, name: &'static str, value: &mut u8) -> Result<(), Self::Error>;
    fn visit_u16(&mut self, name: &'static str, value: &mut u16) -> Result<(), Self::Error>;
    fn visit_i16(&mut self, name: &'static str, value: &mut i16) -> Result<(), Self::Error>;
    fn visit_i32(&mut self, name: &'static str, value: &mut i32) -> Result<(), Self::Error>;
    fn visit_f32(&mut self, name: &'static str, value: &mut f32) -> Result<(), Self::Error>;
    fn visit_string(
        &mut self,
        name: &'static str,
        width: usize,
        value: &mut String,
    ) -> Result<(), Self::Error>;
    fn visit_raw(
        &mut self,
        name: &'static str,
        width: usize,
        value: &mut Vec<u8>,
    ) -> Result<(), Self::Error>;
}

/// May post anonymously.
pub const ABILITY_POST_ANONY: i32 = 0x0001;
/// May send email anonymously.
pub const ABILITY_EMAIL_ANONY: i32 = 0x0002;
/// May see who posted an anonymous message.
pub const ABILITY_READ_POST_ANONY: i32 = 0x0004;
/// May see who sent an anonymous email.
pub const ABILITY_READ_EMAIL_ANONY: i32 = 0x0008;
/// Limited co-sysop rights.
pub const ABILITY_LIMITED_COSYSOP: i32 = 0x0010;
/// Full co-sysop rights.
pub const ABILITY_COSYSOP: i32 = 0x0020;
/// May validate network traffic.
pub const ABILITY_VAL_NET: i32 = 0x0040;

/// Per-level limits and abilities, one entry for each security level 0-255.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityLevel {
    /// Minutes allowed per day.
    pub time_per_day: u16,
    /// Minutes allowed per call.
    pub time_per_logon: u16,
    /// Messages readable per session.
    pub messages_read: u16,
    /// Email messages allowed per day.
    pub emails: u16,
    /// Posts allowed per day.
    pub posts: u16,
    /// Bit-mapped abilities (anonymous post/read, cosysop grades).
    pub ability: i32,
}

impl SecurityLevel {
    pub(crate) fn for_each_field<V: FieldVisitor>(&mut self, v: &mut V) -> Result<(), V::Error> {
        v.visit_u16("time_per_day", &mut self.time_per_day)?;
        v.visit_u16("time_per_logon", &mut self.time_per_logon)?;
        v.visit_u16("messages_read", &mut self.messages_read)?;
        v.visit_u16("emails", &mut self.emails)?;
        v.visit_u16("posts", &mut self.posts)?;
        v.visit_i32("ability", &mut self.ability)
    }
}

/// One sysop quick-validation slot: the levels and flags a single keypress
/// grants a caller.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRecord {
    /// Security level to assign.
    pub sl: u8,
    /// Download security level to assign.
    pub dsl: u8,
    /// Access flags (A-P) to assign.
    pub ar: u16,
    /// Download access flags (A-P) to assign.
    pub dar: u16,
    /// Restriction mask to assign.
    pub restrict: u16,
}

impl ValidationRecord {
    pub(crate) fn for_each_field<V: FieldVisitor>(&mut self, v: &mut V) -> Result<(), V::Error> {
        v.visit_u8("sl", &mut self.sl)?;
        v.visit_u8("dsl", &mut self.dsl)?;
        v.visit_u16("ar", &mut self.ar)?;
        v.visit_u16("dar", &mut self.dar)?;
        v.visit_u16("restrict", &mut self.restrict)
    }
}

/// One archiver slot: the extension it claims and the command lines used
/// to add to, extract from, and list an archive.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiverRecord {
    pub extension: String,
    pub add_command: String,
    pub extract_command: String,
    pub list_command: String,
}

impl ArchiverRecord {
    pub(crate) fn for_each_field<V: FieldVisitor>(&mut self, v: &mut V) -> Result<(), V::Error> {
        v.visit_string("extension", ARC_EXTENSION_WIDTH, &mut self.extension)?;
        v.visit_string("add_command", ARC_COMMAND_WIDTH, &mut self.add_command)?;
        v.visit_string("extract_command", ARC_COMMAND_WIDTH, &mut self.extract_command)?;
        v.visit_string("list_command", ARC_COMMAND_WIDTH, &mut self.list_command)
    }
}

/// The decoded configuration record.
///
/// Field names and widths follow the original DOS layout; every string is a
/// fixed-width NUL-terminated field and every multi-byte number is
/// little-endian on disk. The struct itself is plain data: all fields are
/// public and the editing surface mutates them directly between
/// [`decode`](ConfigRecord::decode) and [`encode`](ConfigRecord::encode).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigRecord {
    pub new_user_password: String,
    pub system_password: String,
    pub msgs_dir: String,
    pub gfiles_dir: String,
    pub data_dir: String,
    pub dloads_dir: String,
    /// Drive letter for a RAM disk, 0 if none.
    pub ram_drive: u8,
    pub temp_dir: String,
    /// Layout sentinel, 0xFF on every file the original tools wrote.
    pub xmark: u8,
    pub reg_code: String,
    pub modem_init: String,
    pub modem_answer: String,
    pub connect_300: String,
    pub connect_1200: String,
    pub connect_2400: String,
    pub connect_9600: String,
    pub connect_19200: String,
    pub no_carrier: String,
    pub ring: String,
    /// Command used to shell out to an external terminal program.
    pub terminal_command: String,
    pub system_name: String,
    pub system_phone: String,
    pub sysop_name: String,
    /// Mail-routing executable invoked at the execute event time.
    pub execute_command: String,
    pub new_user_sl: u8,
    pub new_user_dsl: u8,
    /// Maximum mail messages waiting per user.
    pub max_waiting: u8,
    pub com_port: [u8; COM_PORT_SLOTS],
    pub com_isr: [u8; COM_PORT_SLOTS],
    pub primary_port: u8,
    /// File area receiving new uploads.
    pub new_uploads_dir: u8,
    /// Non-zero if the system accepts no new users.
    pub closed_system: u8,
    /// Network node number of this system.
    pub system_number: u16,
    pub baud_rate: [u16; COM_PORT_SLOTS],
    pub com_base: [u16; COM_PORT_SLOTS],
    pub max_users: u16,
    /// Restriction mask applied to new users; see
    /// [`RestrictionFlags`](crate::legacy::RestrictionFlags).
    pub new_user_restrict: u16,
    /// System option bits.
    pub sysconfig: u16,
    /// Start of the sysop chat window, minutes past midnight.
    pub sysop_low_time: u16,
    /// End of the sysop chat window, minutes past midnight.
    pub sysop_high_time: u16,
    /// Minutes past midnight at which the execute event runs.
    pub execute_time: u16,
    /// Required upload/download ratio, 0.0 to disable.
    pub req_ratio: f32,
    /// Starting gold balance for new users.
    pub new_user_gold: f32,
    #[serde(with = "sl_table")]
    pub sl: [SecurityLevel; SECURITY_LEVEL_COUNT],
    pub autoval: [ValidationRecord; AUTOVAL_SLOTS],
    pub hangup_phone: String,
    pub pickup_phone: String,
    /// Start of the network window, minutes past midnight.
    pub net_low_time: u16,
    /// End of the network window, minutes past midnight.
    pub net_high_time: u16,
    pub connect_300_alt: String,
    pub connect_1200_alt: String,
    pub connect_2400_alt: String,
    pub connect_9600_alt: String,
    pub connect_19200_alt: String,
    pub arcs: [ArchiverRecord; ARCHIVER_SLOTS],
    pub beginday_command: String,
    pub logon_command: String,
    /// Size in bytes of one user record in the user file.
    pub user_rec_len: i16,
    /// Offset of the mail-waiting counter inside a user record.
    pub waiting_offset: i16,
    /// Offset of the inactive flag inside a user record.
    pub inact_offset: i16,
    pub newuser_command: String,
    pub wwiv_reg_number: i32,
    pub dial_prefix: String,
    pub post_call_ratio: f32,
    pub upload_command: String,
    /// Batch download list passed to external protocols.
    pub dsz_batch_dl: String,
    pub modem_type: String,
    pub batch_dir: String,
    /// Offset of the status word inside a user record.
    pub sysstatus_offset: i16,
    pub network_type: u8,
    /// Offset of the forwarding user number inside a user record.
    pub fu_offset: i16,
    /// Offset of the forwarding system number inside a user record.
    pub fs_offset: i16,
    /// Offset of the forwarding network number inside a user record.
    pub fn_offset: i16,
    pub max_subs: u16,
    pub max_dirs: u16,
    /// Length in bytes of one user's quick-scan pointer block.
    pub qscan_len: u16,
    pub email_storage_type: u8,
    /// Extended system option bits.
    pub sysconfig1: i32,
    pub rrd: i32,
    pub menu_dir: String,
    pub logoff_command: String,
    /// Virus-scanner command run against new uploads.
    pub vscan_command: String,
    /// Trailing region the original reserved for expansion; decoded
    /// verbatim, zero-filled to 400 bytes on encode.
    pub reserved: Vec<u8>,
}

impl Default for ConfigRecord {
    /// An all-zero, all-empty record for a fresh editing session.
    fn default() -> Self {
        Self {
            new_user_password: String::new(),
            system_password: String::new(),
            msgs_dir: String::new(),
            gfiles_dir: String::new(),
            data_dir: String::new(),
            dloads_dir: String::new(),
            ram_drive: 0,
            temp_dir: String::new(),
            xmark: 0,
            reg_code: String::new(),
            modem_init: String::new(),
            modem_answer: String::new(),
            connect_300: String::new(),
            connect_1200: String::new(),
            connect_2400: String::new(),
            connect_9600: String::new(),
            connect_19200: String::new(),
            no_carrier: String::new(),
            ring: String::new(),
            terminal_command: String::new(),
            system_name: String::new(),
            system_phone: String::new(),
            sysop_name: String::new(),
            execute_command: String::new(),
            new_user_sl: 0,
            new_user_dsl: 0,
            max_waiting: 0,
            com_port: [0; COM_PORT_SLOTS],
            com_isr: [0; COM_PORT_SLOTS],
            primary_port: 0,
            new_uploads_dir: 0,
            closed_system: 0,
            system_number: 0,
            baud_rate: [0; COM_PORT_SLOTS],
            com_base: [0; COM_PORT_SLOTS],
            max_users: 0,
            new_user_restrict: 0,
            sysconfig: 0,
            sysop_low_time: 0,
            sysop_high_time: 0,
            execute_time: 0,
            req_ratio: 0.0,
            new_user_gold: 0.0,
            sl: [SecurityLevel::default(); SECURITY_LEVEL_COUNT],
            autoval: [ValidationRecord::default(); AUTOVAL_SLOTS],
            hangup_phone: String::new(),
            pickup_phone: String::new(),
            net_low_time: 0,
            net_high_time: 0,
            connect_300_alt: String::new(),
            connect_1200_alt: String::new(),
            connect_2400_alt: String::new(),
            connect_9600_alt: String::new(),
            connect_19200_alt: String::new(),
            arcs: Default::default(),
            beginday_command: String::new(),
            logon_command: String::new(),
            user_rec_len: 0,
            waiting_offset: 0,
            inact_offset: 0,
            newuser_command: String::new(),
            wwiv_reg_number: 0,
            dial_prefix: String::new(),
            post_call_ratio: 0.0,
            upload_command: String::new(),
            dsz_batch_dl: String::new(),
            modem_type: String::new(),
            batch_dir: String::new(),
            sysstatus_offset: 0,
            network_type: 0,
            fu_offset: 0,
            fs_offset: 0,
            fn_offset: 0,
            max_subs: 0,
            max_dirs: 0,
            qscan_len: 0,
            email_storage_type: 0,
            sysconfig1: 0,
            rrd: 0,
            menu_dir: String::new(),
            logoff_command: String::new(),
            vscan_command: String::new(),
            reserved: vec![0; RESERVED_LEN],
        }
    }
}

impl ConfigRecord {
    /// Walks every field exactly once, in on-disk order.
    ///
    /// This is the field table. Nested record arrays recurse into their own
    /// walks in index order, so a visitor sees the whole record as the flat
    /// sequence of primitive fields the file contains.
    pub fn for_each_field<V: FieldVisitor>(&mut self, v: &mut V) -> Result<(), V::Error> {
        v.visit_string("new_user_password", PASSWORD_WIDTH, &mut self.new_user_password)?;
        v.visit_string("system_password", PASSWORD_WIDTH, &mut self.system_password)?;
        v.visit_string("msgs_dir", PATH_WIDTH, &mut self.msgs_dir)?;
        v.visit_string("gfiles_dir", PATH_WIDTH, &mut self.gfiles_dir)?;
        v.visit_string("data_dir", PATH_WIDTH, &mut self.data_dir)?;
        v.visit_string("dloads_dir", PATH_WIDTH, &mut self.dloads_dir)?;
        v.visit_u8("ram_drive", &mut self.ram_drive)?;
        v.visit_string("temp_dir", PATH_WIDTH, &mut self.temp_dir)?;
        v.visit_u8("xmark", &mut self.xmark)?;
        v.visit_string("reg_code", REG_CODE_WIDTH, &mut self.reg_code)?;
        v.visit_string("modem_init", COMMAND_WIDTH, &mut self.modem_init)?;
        v.visit_string("modem_answer", PASSWORD_WIDTH, &mut self.modem_answer)?;
        v.visit_string("connect_300", PASSWORD_WIDTH, &mut self.connect_300)?;
        v.visit_string("connect_1200", PASSWORD_WIDTH, &mut self.connect_1200)?;
        v.visit_string("connect_2400", PASSWORD_WIDTH, &mut self.connect_2400)?;
        v.visit_string("connect_9600", PASSWORD_WIDTH, &mut self.connect_9600)?;
        v.visit_string("connect_19200", PASSWORD_WIDTH, &mut self.connect_19200)?;
        v.visit_string("no_carrier", PASSWORD_WIDTH, &mut self.no_carrier)?;
        v.visit_string("ring", PASSWORD_WIDTH, &mut self.ring)?;
        v.visit_string("terminal_command", PASSWORD_WIDTH, &mut self.terminal_command)?;
        v.visit_string("system_name", COMMAND_WIDTH, &mut self.system_name)?;
        v.visit_string("system_phone", PHONE_WIDTH, &mut self.system_phone)?;
        v.visit_string("sysop_name", COMMAND_WIDTH, &mut self.sysop_name)?;
        v.visit_string("execute_command", COMMAND_WIDTH, &mut self.execute_command)?;
        v.visit_u8("new_user_sl", &mut self.new_user_sl)?;
        v.visit_u8("new_user_dsl", &mut self.new_user_dsl)?;
        v.visit_u8("max_waiting", &mut self.max_waiting)?;
        for p in &mut self.com_port {
            v.visit_u8("com_port", p)?;
        }
        for isr in &mut self.com_isr {
            v.visit_u8("com_isr", isr)?;
        }
        v.visit_u8("primary_port", &mut self.primary_port)?;
        v.visit_u8("new_uploads_dir", &mut self.new_uploads_dir)?;
        v.visit_u8("closed_system", &mut self.closed_system)?;
        v.visit_u16("system_number", &mut self.system_number)?;
        for rate in &mut self.baud_rate {
            v.visit_u16("baud_rate", rate)?;
        }
        for base in &mut self.com_base {
            v.visit_u16("com_base", base)?;
        }
        v.visit_u16("max_users", &mut self.max_users)?;
        v.visit_u16("new_user_restrict", &mut self.new_user_restrict)?;
        v.visit_u16("sysconfig", &mut self.sysconfig)?;
        v.visit_u16("sysop_low_time", &mut self.sysop_low_time)?;
        v.visit_u16("sysop_high_time", &mut self.sysop_high_time)?;
        v.visit_u16("execute_time", &mut self.execute_time)?;
        v.visit_f32("req_ratio", &mut self.req_ratio)?;
        v.visit_f32("new_user_gold", &mut self.new_user_gold)?;
        for level in &mut self.sl {
            level.for_each_field(v)?;
        }
        for slot in &mut self.autoval {
            slot.for_each_field(v)?;
        }
        v.visit_string("hangup_phone", PASSWORD_WIDTH, &mut self.hangup_phone)?;
        v.visit_string("pickup_phone", PASSWORD_WIDTH, &mut self.pickup_phone)?;
        v.visit_u16("net_low_time", &mut self.net_low_time)?;
        v.visit_u16("net_high_time", &mut self.net_high_time)?;
        v.visit_string("connect_300_alt", PASSWORD_WIDTH, &mut self.connect_300_alt)?;
        v.visit_string("connect_1200_alt", PASSWORD_WIDTH, &mut self.connect_1200_alt)?;
        v.visit_string("connect_2400_alt", PASSWORD_WIDTH, &mut self.connect_2400_alt)?;
        v.visit_string("connect_9600_alt", PASSWORD_WIDTH, &mut self.connect_9600_alt)?;
        v.visit_string("connect_19200_alt", PASSWORD_WIDTH, &mut self.connect_19200_alt)?;
        for arc in &mut self.arcs {
            arc.for_each_field(v)?;
        }
        v.visit_string("beginday_command", COMMAND_WIDTH, &mut self.beginday_command)?;
        v.visit_string("logon_command", COMMAND_WIDTH, &mut self.logon_command)?;
        v.visit_i16("user_rec_len", &mut self.user_rec_len)?;
        v.visit_i16("waiting_offset", &mut self.waiting_offset)?;
        v.visit_i16("inact_offset", &mut self.inact_offset)?;
        v.visit_string("newuser_command", COMMAND_WIDTH, &mut self.newuser_command)?;
        v.visit_i32("wwiv_reg_number", &mut self.wwiv_reg_number)?;
        v.visit_string("dial_prefix", PASSWORD_WIDTH, &mut self.dial_prefix)?;
        v.visit_f32("post_call_ratio", &mut self.post_call_ratio)?;
        v.visit_string("upload_command", COMMAND_WIDTH, &mut self.upload_command)?;
        v.visit_string("dsz_batch_dl", PATH_WIDTH, &mut self.dsz_batch_dl)?;
        v.visit_string("modem_type", MODEM_TYPE_WIDTH, &mut self.modem_type)?;
        v.visit_string("batch_dir", PATH_WIDTH, &mut self.batch_dir)?;
        v.visit_i16("sysstatus_offset", &mut self.sysstatus_offset)?;
        v.visit_u8("network_type", &mut self.network_type)?;
        v.visit_i16("fu_offset", &mut self.fu_offset)?;
        v.visit_i16("fs_offset", &mut self.fs_offset)?;
        v.visit_i16("fn_offset", &mut self.fn_offset)?;
        v.visit_u16("max_subs", &mut self.max_subs)?;
        v.visit_u16("max_dirs", &mut self.max_dirs)?;
        v.visit_u16("qscan_len", &mut self.qscan_len)?;
        v.visit_u8("email_storage_type", &mut self.email_storage_type)?;
        v.visit_i32("sysconfig1", &mut self.sysconfig1)?;
        v.visit_i32("rrd", &mut self.rrd)?;
        v.visit_string("menu_dir", PATH_WIDTH, &mut self.menu_dir)?;
        v.visit_string("logoff_command", COMMAND_WIDTH, &mut self.logoff_command)?;
        v.visit_string("vscan_command", COMMAND_WIDTH, &mut self.vscan_command)?;
        v.visit_raw("reserved", RESERVED_LEN, &mut self.reserved)
    }
}

/// Serde shim for the 256-entry level table; serde derives arrays only up
/// to 32 elements, so the table round-trips through a sequence.
mod sl_table {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::SecurityLevel;
    use crate::legacy::layout::SECURITY_LEVEL_COUNT;

    pub fn serialize<S: Serializer>(
        table: &[SecurityLevel; SECURITY_LEVEL_COUNT],
        ser: S,
    ) -> Result<S::Ok, S::Error> {
        table.as_slice().serialize(ser)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<[SecurityLevel; SECURITY_LEVEL_COUNT], D::Error> {
        let entries = Vec::<SecurityLevel>::deserialize(de)?;
        let len = entries.len();
        entries
            .try_into()
            .map_err(|_| D::Error::invalid_length(len, &"exactly 256 security levels"))
    }
}
