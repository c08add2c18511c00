//! Key code decomposition for braille display key events.
//!
//! A key code is an unsigned 64-bit integer split into three parts:
//!
//! - Bits 63-32 ([`KEY_FLAGS_MASK`]): optional flags (modifiers, toggles,
//!   motion hints, keyboard-emulation markers).
//! - Bits 31-29 ([`KEY_TYPE_MASK`]): the key type, either [`KEY_TYPE_CMD`]
//!   for braille commands or [`KEY_TYPE_SYM`] for X keysyms.
//! - Bits 28-0 ([`KEY_CODE_MASK`]): the code itself.
//!
//! The code is further split into a command part and an argument part whose
//! widths depend on the type: braille commands keep the command in bits
//! 28-16 and the argument in bits 15-0; keysyms carrying the
//! [`KEY_SYM_UNICODE`] bit put the code point in the low 24 bits, all other
//! keysyms keep the argument in the low 8 bits (so latin pages and the
//! `0xFFxx` function keysyms split naturally).
//!
//! [`expand`] splits a code into these parts, [`describe`] additionally
//! resolves the symbolic command name and the flag names.

/// Flag portion of a key code (bits 63-32).
pub const KEY_FLAGS_MASK: u64 = 0xFFFF_FFFF_0000_0000;
/// Shift that moves the flag bits down to bit 0.
pub const KEY_FLAGS_SHIFT: u32 = 32;

/// Key type portion of a key code (bits 31-29).
pub const KEY_TYPE_MASK: u64 = 0xE000_0000;
/// Key type: braille command.
pub const KEY_TYPE_CMD: u64 = 0x2000_0000;
/// Key type: X keysym.
pub const KEY_TYPE_SYM: u64 = 0x0000_0000;

/// Code portion of a key code (bits 28-0).
pub const KEY_CODE_MASK: u64 = 0x1FFF_FFFF;

/// Command-block portion of a braille command code (bits 28-16).
pub const KEY_CMD_BLK_MASK: u64 = 0x1FFF_0000;
/// Shift that moves the command block down to bit 0.
pub const KEY_CMD_BLK_SHIFT: u32 = 16;
/// Argument portion of a braille command code (bits 15-0).
pub const KEY_CMD_ARG_MASK: u64 = 0x0000_FFFF;

/// X keysym for Backspace.
pub const KEY_SYM_BACKSPACE: u64 = 0x0000_FF08;
/// X keysym for Tab.
pub const KEY_SYM_TAB: u64 = 0x0000_FF09;
/// X keysym for Linefeed / Return.
pub const KEY_SYM_LINEFEED: u64 = 0x0000_FF0D;
/// X keysym for Escape.
pub const KEY_SYM_ESCAPE: u64 = 0x0000_FF1B;
/// X keysym for Home.
pub const KEY_SYM_HOME: u64 = 0x0000_FF50;
/// X keysym for the left arrow.
pub const KEY_SYM_LEFT: u64 = 0x0000_FF51;
/// X keysym for the up arrow.
pub const KEY_SYM_UP: u64 = 0x0000_FF52;
/// X keysym for the right arrow.
pub const KEY_SYM_RIGHT: u64 = 0x0000_FF53;
/// X keysym for the down arrow.
pub const KEY_SYM_DOWN: u64 = 0x0000_FF54;
/// X keysym for Page Up.
pub const KEY_SYM_PAGE_UP: u64 = 0x0000_FF55;
/// X keysym for Page Down.
pub const KEY_SYM_PAGE_DOWN: u64 = 0x0000_FF56;
/// X keysym for End.
pub const KEY_SYM_END: u64 = 0x0000_FF57;
/// X keysym for Insert.
pub const KEY_SYM_INSERT: u64 = 0x0000_FF63;
/// X keysym for F1; F2..F35 follow consecutively.
pub const KEY_SYM_FUNCTION: u64 = 0x0000_FFBE;
/// X keysym for Delete.
pub const KEY_SYM_DELETE: u64 = 0x0000_FFFF;
/// Marker bit for Unicode keysyms; the code point sits in the low 24 bits.
pub const KEY_SYM_UNICODE: u64 = 0x0100_0000;

// Commands of the base block: complete on their own, no argument.
/// Do nothing.
pub const KEY_CMD_NOOP: u64 = 0;
/// Go up one line.
pub const KEY_CMD_LNUP: u64 = 1;
/// Go down one line.
pub const KEY_CMD_LNDN: u64 = 2;
/// Go up several lines.
pub const KEY_CMD_WINUP: u64 = 3;
/// Go down several lines.
pub const KEY_CMD_WINDN: u64 = 4;
/// Go up to nearest line with different content.
pub const KEY_CMD_PRDIFLN: u64 = 5;
/// Go down to nearest line with different content.
pub const KEY_CMD_NXDIFLN: u64 = 6;
/// Go up to nearest line with different highlighting.
pub const KEY_CMD_ATTRUP: u64 = 7;
/// Go down to nearest line with different highlighting.
pub const KEY_CMD_ATTRDN: u64 = 8;
/// Go to top line.
pub const KEY_CMD_TOP: u64 = 9;
/// Go to bottom line.
pub const KEY_CMD_BOT: u64 = 10;
/// Go to beginning of top line.
pub const KEY_CMD_TOP_LEFT: u64 = 11;
/// Go to beginning of bottom line.
pub const KEY_CMD_BOT_LEFT: u64 = 12;
/// Go up to first line of paragraph.
pub const KEY_CMD_PRPGRPH: u64 = 13;
/// Go down to first line of next paragraph.
pub const KEY_CMD_NXPGRPH: u64 = 14;
/// Go up to previous command prompt.
pub const KEY_CMD_PRPROMPT: u64 = 15;
/// Go down to next command prompt.
pub const KEY_CMD_NXPROMPT: u64 = 16;
/// Search backward for clipboard text.
pub const KEY_CMD_PRSEARCH: u64 = 17;
/// Search forward for clipboard text.
pub const KEY_CMD_NXSEARCH: u64 = 18;
/// Go left one character.
pub const KEY_CMD_CHRLT: u64 = 19;
/// Go right one character.
pub const KEY_CMD_CHRRT: u64 = 20;
/// Go left half a braille window.
pub const KEY_CMD_HWINLT: u64 = 21;
/// Go right half a braille window.
pub const KEY_CMD_HWINRT: u64 = 22;
/// Go backward one braille window.
pub const KEY_CMD_FWINLT: u64 = 23;
/// Go forward one braille window.
pub const KEY_CMD_FWINRT: u64 = 24;
/// Go backward skipping blank braille windows.
pub const KEY_CMD_FWINLTSKIP: u64 = 25;
/// Go forward skipping blank braille windows.
pub const KEY_CMD_FWINRTSKIP: u64 = 26;
/// Go to beginning of line.
pub const KEY_CMD_LNBEG: u64 = 27;
/// Go to end of line.
pub const KEY_CMD_LNEND: u64 = 28;
/// Go to screen cursor.
pub const KEY_CMD_HOME: u64 = 29;
/// Go back after cursor tracking.
pub const KEY_CMD_BACK: u64 = 30;
/// Go to screen cursor or go back after cursor tracking.
pub const KEY_CMD_RETURN: u64 = 31;
/// Set screen image frozen/unfrozen.
pub const KEY_CMD_FREEZE: u64 = 32;
/// Set display mode attributes/text.
pub const KEY_CMD_DISPMD: u64 = 33;
/// Set text style 6-dot/8-dot.
pub const KEY_CMD_SIXDOTS: u64 = 34;
/// Set sliding braille window on/off.
pub const KEY_CMD_SLIDEWIN: u64 = 35;
/// Set skipping of lines with identical content on/off.
pub const KEY_CMD_SKPIDLNS: u64 = 36;
/// Set skipping of blank braille windows on/off.
pub const KEY_CMD_SKPBLNKWINS: u64 = 37;
/// Set screen cursor visibility on/off.
pub const KEY_CMD_CSRVIS: u64 = 38;
/// Set hidden screen cursor on/off.
pub const KEY_CMD_CSRHIDE: u64 = 39;
/// Set track screen cursor on/off.
pub const KEY_CMD_CSRTRK: u64 = 40;
/// Set screen cursor style block/underline.
pub const KEY_CMD_CSRSIZE: u64 = 41;
/// Set screen cursor blinking on/off.
pub const KEY_CMD_CSRBLINK: u64 = 42;
/// Set attribute underlining on/off.
pub const KEY_CMD_ATTRVIS: u64 = 43;
/// Set attribute blinking on/off.
pub const KEY_CMD_ATTRBLINK: u64 = 44;
/// Set capital letter blinking on/off.
pub const KEY_CMD_CAPBLINK: u64 = 45;
/// Set alert tunes on/off.
pub const KEY_CMD_TUNES: u64 = 46;
/// Set autorepeat on/off.
pub const KEY_CMD_AUTOREPEAT: u64 = 47;
/// Set autospeak on/off.
pub const KEY_CMD_AUTOSPEAK: u64 = 48;
/// Enter/leave help display.
pub const KEY_CMD_HELP: u64 = 49;
/// Enter/leave status display.
pub const KEY_CMD_INFO: u64 = 50;
/// Enter/leave command learn mode.
pub const KEY_CMD_LEARN: u64 = 51;
/// Enter/leave preferences menu.
pub const KEY_CMD_PREFMENU: u64 = 52;
/// Save preferences to disk.
pub const KEY_CMD_PREFSAVE: u64 = 53;
/// Restore preferences from disk.
pub const KEY_CMD_PREFLOAD: u64 = 54;
/// Go up to first item.
pub const KEY_CMD_MENU_FIRST_ITEM: u64 = 55;
/// Go down to last item.
pub const KEY_CMD_MENU_LAST_ITEM: u64 = 56;
/// Go up to previous item.
pub const KEY_CMD_MENU_PREV_ITEM: u64 = 57;
/// Go down to next item.
pub const KEY_CMD_MENU_NEXT_ITEM: u64 = 58;
/// Select previous choice.
pub const KEY_CMD_MENU_PREV_SETTING: u64 = 59;
/// Select next choice.
pub const KEY_CMD_MENU_NEXT_SETTING: u64 = 60;
/// Stop speaking.
pub const KEY_CMD_MUTE: u64 = 61;
/// Go to current speaking position.
pub const KEY_CMD_SPKHOME: u64 = 62;
/// Speak current line.
pub const KEY_CMD_SAY_LINE: u64 = 63;
/// Speak from top of screen through current line.
pub const KEY_CMD_SAY_ABOVE: u64 = 64;
/// Speak from current line through bottom of screen.
pub const KEY_CMD_SAY_BELOW: u64 = 65;
/// Decrease speaking rate.
pub const KEY_CMD_SAY_SLOWER: u64 = 66;
/// Increase speaking rate.
pub const KEY_CMD_SAY_FASTER: u64 = 67;
/// Decrease speaking volume.
pub const KEY_CMD_SAY_SOFTER: u64 = 68;
/// Increase speaking volume.
pub const KEY_CMD_SAY_LOUDER: u64 = 69;
/// Switch to the previous virtual terminal.
pub const KEY_CMD_SWITCHVT_PREV: u64 = 70;
/// Switch to the next virtual terminal.
pub const KEY_CMD_SWITCHVT_NEXT: u64 = 71;
/// Bring screen cursor to current line.
pub const KEY_CMD_CSRJMP_VERT: u64 = 72;
/// Insert clipboard text after screen cursor.
pub const KEY_CMD_PASTE: u64 = 73;
/// Restart braille driver.
pub const KEY_CMD_RESTARTBRL: u64 = 74;
/// Restart speech driver.
pub const KEY_CMD_RESTARTSPEECH: u64 = 75;
/// Braille display temporarily unavailable.
pub const KEY_CMD_OFFLINE: u64 = 76;
/// Cycle the Shift sticky input modifier (next, on, off).
pub const KEY_CMD_SHIFT: u64 = 77;
/// Cycle the Upper sticky input modifier (next, on, off).
pub const KEY_CMD_UPPER: u64 = 78;
/// Cycle the Control sticky input modifier (next, on, off).
pub const KEY_CMD_CONTROL: u64 = 79;
/// Cycle the Meta (Left Alt) sticky input modifier (next, on, off).
pub const KEY_CMD_META: u64 = 80;
/// Show current date and time.
pub const KEY_CMD_TIME: u64 = 81;
/// Go to previous menu level.
pub const KEY_CMD_MENU_PREV_LEVEL: u64 = 82;
/// Set autospeak selected line on/off.
pub const KEY_CMD_ASPK_SEL_LINE: u64 = 83;
/// Set autospeak selected character on/off.
pub const KEY_CMD_ASPK_SEL_CHAR: u64 = 84;
/// Set autospeak inserted characters on/off.
pub const KEY_CMD_ASPK_INS_CHARS: u64 = 85;
/// Set autospeak deleted characters on/off.
pub const KEY_CMD_ASPK_DEL_CHARS: u64 = 86;
/// Set autospeak replaced characters on/off.
pub const KEY_CMD_ASPK_REP_CHARS: u64 = 87;
/// Set autospeak completed words on/off.
pub const KEY_CMD_ASPK_CMP_WORDS: u64 = 88;
/// Speak current character.
pub const KEY_CMD_SPEAK_CURR_CHAR: u64 = 89;
/// Go to and speak previous character.
pub const KEY_CMD_SPEAK_PREV_CHAR: u64 = 90;
/// Go to and speak next character.
pub const KEY_CMD_SPEAK_NEXT_CHAR: u64 = 91;
/// Speak current word.
pub const KEY_CMD_SPEAK_CURR_WORD: u64 = 92;
/// Go to and speak previous word.
pub const KEY_CMD_SPEAK_PREV_WORD: u64 = 93;
/// Go to and speak next word.
pub const KEY_CMD_SPEAK_NEXT_WORD: u64 = 94;
/// Speak current line.
pub const KEY_CMD_SPEAK_CURR_LINE: u64 = 95;
/// Go to and speak previous line.
pub const KEY_CMD_SPEAK_PREV_LINE: u64 = 96;
/// Go to and speak next line.
pub const KEY_CMD_SPEAK_NEXT_LINE: u64 = 97;
/// Go to and speak first non-blank character on line.
pub const KEY_CMD_SPEAK_FRST_CHAR: u64 = 98;
/// Go to and speak last non-blank character on line.
pub const KEY_CMD_SPEAK_LAST_CHAR: u64 = 99;
/// Go to and speak first non-blank line on screen.
pub const KEY_CMD_SPEAK_FRST_LINE: u64 = 100;
/// Go to and speak last non-blank line on screen.
pub const KEY_CMD_SPEAK_LAST_LINE: u64 = 101;
/// Describe current character.
pub const KEY_CMD_DESC_CURR_CHAR: u64 = 102;
/// Spell current word.
pub const KEY_CMD_SPELL_CURR_WORD: u64 = 103;
/// Bring screen cursor to speech cursor.
pub const KEY_CMD_ROUTE_CURR_LOCN: u64 = 104;
/// Speak speech cursor location.
pub const KEY_CMD_SPEAK_CURR_LOCN: u64 = 105;
/// Set speech cursor visibility on/off.
pub const KEY_CMD_SHOW_CURR_LOCN: u64 = 106;
/// Save clipboard to disk.
pub const KEY_CMD_CLIP_SAVE: u64 = 107;
/// Restore clipboard from disk.
pub const KEY_CMD_CLIP_RESTORE: u64 = 108;
/// Set braille typing mode dots/text.
pub const KEY_CMD_BRLUCDOTS: u64 = 109;
/// Set braille keyboard enabled/disabled.
pub const KEY_CMD_BRLKBD: u64 = 110;
/// Clear all sticky input modifiers.
pub const KEY_CMD_UNSTICK: u64 = 111;
/// Cycle the AltGr (Right Alt) sticky input modifier (next, on, off).
pub const KEY_CMD_ALTGR: u64 = 112;
/// Cycle the GUI (Windows) sticky input modifier (next, on, off).
pub const KEY_CMD_GUI: u64 = 113;
/// Stop the braille driver.
pub const KEY_CMD_BRL_STOP: u64 = 114;
/// Start the braille driver.
pub const KEY_CMD_BRL_START: u64 = 115;
/// Stop the speech driver.
pub const KEY_CMD_SPK_STOP: u64 = 116;
/// Start the speech driver.
pub const KEY_CMD_SPK_START: u64 = 117;
/// Stop the screen driver.
pub const KEY_CMD_SCR_STOP: u64 = 118;
/// Start the screen driver.
pub const KEY_CMD_SCR_START: u64 = 119;
/// Bind to the previous virtual terminal.
pub const KEY_CMD_SELECTVT_PREV: u64 = 120;
/// Bind to the next virtual terminal.
pub const KEY_CMD_SELECTVT_NEXT: u64 = 121;
/// Go backward to nearest non-blank braille window.
pub const KEY_CMD_PRNBWIN: u64 = 122;
/// Go forward to nearest non-blank braille window.
pub const KEY_CMD_NXNBWIN: u64 = 123;
/// Set touch navigation on/off.
pub const KEY_CMD_TOUCH_NAV: u64 = 124;
/// Speak indent of current line.
pub const KEY_CMD_SPEAK_INDENT: u64 = 125;
/// Set autospeak indent of current line on/off.
pub const KEY_CMD_ASPK_INDENT: u64 = 126;
/// Refresh braille display.
pub const KEY_CMD_REFRESH: u64 = 127;
/// Show various device status indicators.
pub const KEY_CMD_INDICATORS: u64 = 128;
/// Clear the text selection.
pub const KEY_CMD_TXTSEL_CLEAR: u64 = 129;
/// Select all of the text.
pub const KEY_CMD_TXTSEL_ALL: u64 = 130;
/// Copy selected text to host clipboard.
pub const KEY_CMD_HOST_COPY: u64 = 131;
/// Cut selected text to host clipboard.
pub const KEY_CMD_HOST_CUT: u64 = 132;
/// Insert host clipboard text after screen cursor.
pub const KEY_CMD_HOST_PASTE: u64 = 133;
/// Show the window title.
pub const KEY_CMD_GUI_TITLE: u64 = 134;
/// Open the braille actions window.
pub const KEY_CMD_GUI_BRL_ACTIONS: u64 = 135;
/// Go to the home screen.
pub const KEY_CMD_GUI_HOME: u64 = 136;
/// Go back to the previous screen.
pub const KEY_CMD_GUI_BACK: u64 = 137;
/// Open the device settings window.
pub const KEY_CMD_GUI_DEV_SETTINGS: u64 = 138;
/// Open the device options window.
pub const KEY_CMD_GUI_DEV_OPTIONS: u64 = 139;
/// Open the application list window.
pub const KEY_CMD_GUI_APP_LIST: u64 = 140;
/// Open the application-specific menu.
pub const KEY_CMD_GUI_APP_MENU: u64 = 141;
/// Open the application alerts window.
pub const KEY_CMD_GUI_APP_ALERTS: u64 = 142;
/// Return to the active screen area.
pub const KEY_CMD_GUI_AREA_ACTV: u64 = 143;
/// Switch to the previous screen area.
pub const KEY_CMD_GUI_AREA_PREV: u64 = 144;
/// Switch to the next screen area.
pub const KEY_CMD_GUI_AREA_NEXT: u64 = 145;
/// Move to the first item in the screen area.
pub const KEY_CMD_GUI_ITEM_FRST: u64 = 146;
/// Move to the previous item in the screen area.
pub const KEY_CMD_GUI_ITEM_PREV: u64 = 147;
/// Move to the next item in the screen area.
pub const KEY_CMD_GUI_ITEM_NEXT: u64 = 148;
/// Move to the last item in the screen area.
pub const KEY_CMD_GUI_ITEM_LAST: u64 = 149;
/// Decrease speaking pitch.
pub const KEY_CMD_SAY_LOWER: u64 = 150;
/// Increase speaking pitch.
pub const KEY_CMD_SAY_HIGHER: u64 = 151;
/// Speak from top of screen through bottom of screen.
pub const KEY_CMD_SAY_ALL: u64 = 152;
/// Set contracted/computer braille.
pub const KEY_CMD_CONTRACTED: u64 = 153;
/// Set six/eight dot computer braille.
pub const KEY_CMD_COMPBRL6: u64 = 154;
/// Reset preferences to defaults.
pub const KEY_CMD_PREFRESET: u64 = 155;
/// Set autospeak empty line on/off.
pub const KEY_CMD_ASPK_EMP_LINE: u64 = 156;
/// Cycle speech punctuation level.
pub const KEY_CMD_SPK_PUNCT_LEVEL: u64 = 157;

// Command blocks whose low 16 bits carry an argument.
/// Bring the screen cursor to the given cell.
pub const KEY_CMD_ROUTE: u64 = 1 << KEY_CMD_BLK_SHIFT;
/// Start a new clipboard copy at the given cell.
pub const KEY_CMD_CLIP_NEW: u64 = 2 << KEY_CMD_BLK_SHIFT;
/// Deprecated alias for [`KEY_CMD_CLIP_NEW`].
pub const KEY_CMD_CUTBEGIN: u64 = 2 << KEY_CMD_BLK_SHIFT;
/// Append to the clipboard starting at the given cell.
pub const KEY_CMD_CLIP_ADD: u64 = 3 << KEY_CMD_BLK_SHIFT;
/// Deprecated alias for [`KEY_CMD_CLIP_ADD`].
pub const KEY_CMD_CUTAPPEND: u64 = 3 << KEY_CMD_BLK_SHIFT;
/// Rectangular copy ending at the given cell.
pub const KEY_CMD_COPY_RECT: u64 = 4 << KEY_CMD_BLK_SHIFT;
/// Deprecated alias for [`KEY_CMD_COPY_RECT`].
pub const KEY_CMD_CUTRECT: u64 = 4 << KEY_CMD_BLK_SHIFT;
/// Linear copy ending at the given cell.
pub const KEY_CMD_COPY_LINE: u64 = 5 << KEY_CMD_BLK_SHIFT;
/// Deprecated alias for [`KEY_CMD_COPY_LINE`].
pub const KEY_CMD_CUTLINE: u64 = 5 << KEY_CMD_BLK_SHIFT;
/// Switch to the given virtual terminal.
pub const KEY_CMD_SWITCHVT: u64 = 6 << KEY_CMD_BLK_SHIFT;
/// Go up to the nearest line indented no more than the argument.
pub const KEY_CMD_PRINDENT: u64 = 7 << KEY_CMD_BLK_SHIFT;
/// Go down to the nearest line indented no more than the argument.
pub const KEY_CMD_NXINDENT: u64 = 8 << KEY_CMD_BLK_SHIFT;
/// Describe the character at the given cell.
pub const KEY_CMD_DESCCHAR: u64 = 9 << KEY_CMD_BLK_SHIFT;
/// Place the left end of the braille window at the given cell.
pub const KEY_CMD_SETLEFT: u64 = 10 << KEY_CMD_BLK_SHIFT;
/// Remember the current position as the given mark.
pub const KEY_CMD_SETMARK: u64 = 11 << KEY_CMD_BLK_SHIFT;
/// Go back to the given mark.
pub const KEY_CMD_GOTOMARK: u64 = 12 << KEY_CMD_BLK_SHIFT;
/// Go to the given line.
pub const KEY_CMD_GOTOLINE: u64 = 13 << KEY_CMD_BLK_SHIFT;
/// Go up to the nearest line differing at the given cell.
pub const KEY_CMD_PRDIFCHAR: u64 = 14 << KEY_CMD_BLK_SHIFT;
/// Go down to the nearest line differing at the given cell.
pub const KEY_CMD_NXDIFCHAR: u64 = 15 << KEY_CMD_BLK_SHIFT;
/// Copy the marked characters to the clipboard.
pub const KEY_CMD_CLIP_COPY: u64 = 16 << KEY_CMD_BLK_SHIFT;
/// Deprecated alias for [`KEY_CMD_CLIP_COPY`].
pub const KEY_CMD_COPYCHARS: u64 = 16 << KEY_CMD_BLK_SHIFT;
/// Append the marked characters to the clipboard.
pub const KEY_CMD_CLIP_APPEND: u64 = 17 << KEY_CMD_BLK_SHIFT;
/// Deprecated alias for [`KEY_CMD_CLIP_APPEND`].
pub const KEY_CMD_APNDCHARS: u64 = 17 << KEY_CMD_BLK_SHIFT;
/// Paste the given clipboard-history entry.
pub const KEY_CMD_PASTE_HISTORY: u64 = 18 << KEY_CMD_BLK_SHIFT;
/// Select the given text table.
pub const KEY_CMD_SET_TEXT_TABLE: u64 = 19 << KEY_CMD_BLK_SHIFT;
/// Select the given attributes table.
pub const KEY_CMD_SET_ATTRIBUTES_TABLE: u64 = 20 << KEY_CMD_BLK_SHIFT;
/// Select the given contraction table.
pub const KEY_CMD_SET_CONTRACTION_TABLE: u64 = 21 << KEY_CMD_BLK_SHIFT;
/// Select the given keyboard table.
pub const KEY_CMD_SET_KEYBOARD_TABLE: u64 = 22 << KEY_CMD_BLK_SHIFT;
/// Select the given language profile.
pub const KEY_CMD_SET_LANGUAGE_PROFILE: u64 = 23 << KEY_CMD_BLK_SHIFT;
/// Bring the screen cursor to the given line.
pub const KEY_CMD_ROUTE_LINE: u64 = 24 << KEY_CMD_BLK_SHIFT;
/// Refresh the given line.
pub const KEY_CMD_REFRESH_LINE: u64 = 25 << KEY_CMD_BLK_SHIFT;
/// Start a text selection at the given cell.
pub const KEY_CMD_TXTSEL_START: u64 = 26 << KEY_CMD_BLK_SHIFT;
/// Extend the text selection to the given cell.
pub const KEY_CMD_TXTSEL_SET: u64 = 27 << KEY_CMD_BLK_SHIFT;
/// Bring the speech cursor to the given cell.
pub const KEY_CMD_ROUTE_SPEECH: u64 = 28 << KEY_CMD_BLK_SHIFT;
/// Bind to the given virtual terminal.
pub const KEY_CMD_SELECTVT: u64 = 30 << KEY_CMD_BLK_SHIFT;
/// Render the given alert.
pub const KEY_CMD_ALERT: u64 = 31 << KEY_CMD_BLK_SHIFT;
/// Enter a braille dot pattern.
pub const KEY_CMD_PASSDOTS: u64 = 34 << KEY_CMD_BLK_SHIFT;
/// Pass an AT scan code through to the keyboard layer.
pub const KEY_CMD_PASSAT: u64 = 35 << KEY_CMD_BLK_SHIFT;
/// Pass an XT scan code through to the keyboard layer.
pub const KEY_CMD_PASSXT: u64 = 36 << KEY_CMD_BLK_SHIFT;
/// Pass a PS/2 scan code through to the keyboard layer.
pub const KEY_CMD_PASSPS2: u64 = 37 << KEY_CMD_BLK_SHIFT;
/// Switch to the given key-binding context.
pub const KEY_CMD_CONTEXT: u64 = 38 << KEY_CMD_BLK_SHIFT;
/// Touch navigation at the given offset.
pub const KEY_CMD_TOUCH_AT: u64 = 39 << KEY_CMD_BLK_SHIFT;
/// Run the given command macro.
pub const KEY_CMD_MACRO: u64 = 40 << KEY_CMD_BLK_SHIFT;
/// Run the given host command.
pub const KEY_CMD_HOSTCMD: u64 = 41 << KEY_CMD_BLK_SHIFT;

// Flag bits (pre-shifted into the high word).
/// Mod1 modifier (usually Meta).
pub const KEY_FLG_MOD1: u64 = 0x00000008 << KEY_FLAGS_SHIFT;
/// Mod2 modifier (usually NumLock).
pub const KEY_FLG_MOD2: u64 = 0x00000010 << KEY_FLAGS_SHIFT;
/// Mod3 modifier.
pub const KEY_FLG_MOD3: u64 = 0x00000020 << KEY_FLAGS_SHIFT;
/// Mod4 modifier.
pub const KEY_FLG_MOD4: u64 = 0x00000040 << KEY_FLAGS_SHIFT;
/// Mod5 modifier (usually AltGr).
pub const KEY_FLG_MOD5: u64 = 0x00000080 << KEY_FLAGS_SHIFT;
/// Enable feature.
pub const KEY_FLG_TOGGLE_ON: u64 = 0x0100 << KEY_FLAGS_SHIFT;
/// Disable feature.
pub const KEY_FLG_TOGGLE_OFF: u64 = 0x0200 << KEY_FLAGS_SHIFT;
/// Bring screen cursor into braille window after function.
pub const KEY_FLG_MOTION_ROUTE: u64 = 0x0400 << KEY_FLAGS_SHIFT;
/// Scale arg=0X00-0XFF to screen height.
pub const KEY_FLG_MOTION_SCALED: u64 = 0x0800 << KEY_FLAGS_SHIFT;
/// Go to beginning of line.
pub const KEY_FLG_MOTION_TOLEFT: u64 = 0x1000 << KEY_FLAGS_SHIFT;
/// Shift key pressed.
pub const KEY_FLG_SHIFT: u64 = 0x01 << KEY_FLAGS_SHIFT;
/// Convert to uppercase.
pub const KEY_FLG_UPPER: u64 = 0x02 << KEY_FLAGS_SHIFT;
/// Control key pressed.
pub const KEY_FLG_CONTROL: u64 = 0x04 << KEY_FLAGS_SHIFT;
/// Meta (left alt) key pressed.
pub const KEY_FLG_META: u64 = 0x08 << KEY_FLAGS_SHIFT;
/// Altgr (right alt) key pressed.
pub const KEY_FLG_ALTGR: u64 = 0x10 << KEY_FLAGS_SHIFT;
/// Gui (windows) key pressed.
pub const KEY_FLG_GUI: u64 = 0x20 << KEY_FLAGS_SHIFT;
/// Prefix with escape.
pub const KEY_FLG_ESCAPED: u64 = 0x40 << KEY_FLAGS_SHIFT;
/// Capslock key pressed.
pub const KEY_FLG_CAPSLOCK: u64 = 0x80 << KEY_FLAGS_SHIFT;
/// It is a release scan code.
pub const KEY_FLG_KBD_RELEASE: u64 = 0x0100 << KEY_FLAGS_SHIFT;
/// It is an emulation 0 scan code.
pub const KEY_FLG_KBD_EMUL0: u64 = 0x0200 << KEY_FLAGS_SHIFT;
/// It is an emulation 1 scan code.
pub const KEY_FLG_KBD_EMUL1: u64 = 0x0400 << KEY_FLAGS_SHIFT;

/// Both toggle flags.
pub const KEY_FLG_TOGGLE_MASK: u64 = KEY_FLG_TOGGLE_ON | KEY_FLG_TOGGLE_OFF;

/// Upper-left dot of a standard braille cell.
pub const DOT1: u8 = 0x01;
/// Middle-left dot of a standard braille cell.
pub const DOT2: u8 = 0x02;
/// Lower-left dot of a standard braille cell.
pub const DOT3: u8 = 0x04;
/// Upper-right dot of a standard braille cell.
pub const DOT4: u8 = 0x08;
/// Middle-right dot of a standard braille cell.
pub const DOT5: u8 = 0x10;
/// Lower-right dot of a standard braille cell.
pub const DOT6: u8 = 0x20;
/// Lower-left dot of a computer braille cell.
pub const DOT7: u8 = 0x40;
/// Lower-right dot of a computer braille cell.
pub const DOT8: u8 = 0x80;
/// Chord (space bar) bit in a `PASSDOTS` argument.
pub const DOT_CHORD: u16 = 0x100;

/// Compose a dot pattern from per-dot booleans, dot 1 first.
pub const fn dots(pattern: [bool; 8]) -> u8 {
    let mut cell = 0u8;
    let mut i = 0;
    while i < 8 {
        if pattern[i] {
            cell |= 1 << i;
        }
        i += 1;
    }
    cell
}

// Symbolic names keyed by `type | command`; argument-free entries carry
// their fixed argument bits in the key (function keysyms, arrow keysyms).
static KEY_NAMES: &[(u64, &str)] = &[
    (KEY_TYPE_CMD | KEY_CMD_NOOP, "NOOP"),
    (KEY_TYPE_CMD | KEY_CMD_LNUP, "LNUP"),
    (KEY_TYPE_CMD | KEY_CMD_LNDN, "LNDN"),
    (KEY_TYPE_CMD | KEY_CMD_WINUP, "WINUP"),
    (KEY_TYPE_CMD | KEY_CMD_WINDN, "WINDN"),
    (KEY_TYPE_CMD | KEY_CMD_PRDIFLN, "PRDIFLN"),
    (KEY_TYPE_CMD | KEY_CMD_NXDIFLN, "NXDIFLN"),
    (KEY_TYPE_CMD | KEY_CMD_ATTRUP, "ATTRUP"),
    (KEY_TYPE_CMD | KEY_CMD_ATTRDN, "ATTRDN"),
    (KEY_TYPE_CMD | KEY_CMD_TOP, "TOP"),
    (KEY_TYPE_CMD | KEY_CMD_BOT, "BOT"),
    (KEY_TYPE_CMD | KEY_CMD_TOP_LEFT, "TOP_LEFT"),
    (KEY_TYPE_CMD | KEY_CMD_BOT_LEFT, "BOT_LEFT"),
    (KEY_TYPE_CMD | KEY_CMD_PRPGRPH, "PRPGRPH"),
    (KEY_TYPE_CMD | KEY_CMD_NXPGRPH, "NXPGRPH"),
    (KEY_TYPE_CMD | KEY_CMD_PRPROMPT, "PRPROMPT"),
    (KEY_TYPE_CMD | KEY_CMD_NXPROMPT, "NXPROMPT"),
    (KEY_TYPE_CMD | KEY_CMD_PRSEARCH, "PRSEARCH"),
    (KEY_TYPE_CMD | KEY_CMD_NXSEARCH, "NXSEARCH"),
    (KEY_TYPE_CMD | KEY_CMD_CHRLT, "CHRLT"),
    (KEY_TYPE_CMD | KEY_CMD_CHRRT, "CHRRT"),
    (KEY_TYPE_CMD | KEY_CMD_HWINLT, "HWINLT"),
    (KEY_TYPE_CMD | KEY_CMD_HWINRT, "HWINRT"),
    (KEY_TYPE_CMD | KEY_CMD_FWINLT, "FWINLT"),
    (KEY_TYPE_CMD | KEY_CMD_FWINRT, "FWINRT"),
    (KEY_TYPE_CMD | KEY_CMD_FWINLTSKIP, "FWINLTSKIP"),
    (KEY_TYPE_CMD | KEY_CMD_FWINRTSKIP, "FWINRTSKIP"),
    (KEY_TYPE_CMD | KEY_CMD_LNBEG, "LNBEG"),
    (KEY_TYPE_CMD | KEY_CMD_LNEND, "LNEND"),
    (KEY_TYPE_CMD | KEY_CMD_HOME, "HOME"),
    (KEY_TYPE_CMD | KEY_CMD_BACK, "BACK"),
    (KEY_TYPE_CMD | KEY_CMD_RETURN, "RETURN"),
    (KEY_TYPE_CMD | KEY_CMD_FREEZE, "FREEZE"),
    (KEY_TYPE_CMD | KEY_CMD_DISPMD, "DISPMD"),
    (KEY_TYPE_CMD | KEY_CMD_SIXDOTS, "SIXDOTS"),
    (KEY_TYPE_CMD | KEY_CMD_SLIDEWIN, "SLIDEWIN"),
    (KEY_TYPE_CMD | KEY_CMD_SKPIDLNS, "SKPIDLNS"),
    (KEY_TYPE_CMD | KEY_CMD_SKPBLNKWINS, "SKPBLNKWINS"),
    (KEY_TYPE_CMD | KEY_CMD_CSRVIS, "CSRVIS"),
    (KEY_TYPE_CMD | KEY_CMD_CSRHIDE, "CSRHIDE"),
    (KEY_TYPE_CMD | KEY_CMD_CSRTRK, "CSRTRK"),
    (KEY_TYPE_CMD | KEY_CMD_CSRSIZE, "CSRSIZE"),
    (KEY_TYPE_CMD | KEY_CMD_CSRBLINK, "CSRBLINK"),
    (KEY_TYPE_CMD | KEY_CMD_ATTRVIS, "ATTRVIS"),
    (KEY_TYPE_CMD | KEY_CMD_ATTRBLINK, "ATTRBLINK"),
    (KEY_TYPE_CMD | KEY_CMD_CAPBLINK, "CAPBLINK"),
    (KEY_TYPE_CMD | KEY_CMD_TUNES, "TUNES"),
    (KEY_TYPE_CMD | KEY_CMD_AUTOREPEAT, "AUTOREPEAT"),
    (KEY_TYPE_CMD | KEY_CMD_AUTOSPEAK, "AUTOSPEAK"),
    (KEY_TYPE_CMD | KEY_CMD_HELP, "HELP"),
    (KEY_TYPE_CMD | KEY_CMD_INFO, "INFO"),
    (KEY_TYPE_CMD | KEY_CMD_LEARN, "LEARN"),
    (KEY_TYPE_CMD | KEY_CMD_PREFMENU, "PREFMENU"),
    (KEY_TYPE_CMD | KEY_CMD_PREFSAVE, "PREFSAVE"),
    (KEY_TYPE_CMD | KEY_CMD_PREFLOAD, "PREFLOAD"),
    (KEY_TYPE_CMD | KEY_CMD_MENU_FIRST_ITEM, "MENU_FIRST_ITEM"),
    (KEY_TYPE_CMD | KEY_CMD_MENU_LAST_ITEM, "MENU_LAST_ITEM"),
    (KEY_TYPE_CMD | KEY_CMD_MENU_PREV_ITEM, "MENU_PREV_ITEM"),
    (KEY_TYPE_CMD | KEY_CMD_MENU_NEXT_ITEM, "MENU_NEXT_ITEM"),
    (KEY_TYPE_CMD | KEY_CMD_MENU_PREV_SETTING, "MENU_PREV_SETTING"),
    (KEY_TYPE_CMD | KEY_CMD_MENU_NEXT_SETTING, "MENU_NEXT_SETTING"),
    (KEY_TYPE_CMD | KEY_CMD_MUTE, "MUTE"),
    (KEY_TYPE_CMD | KEY_CMD_SPKHOME, "SPKHOME"),
    (KEY_TYPE_CMD | KEY_CMD_SAY_LINE, "SAY_LINE"),
    (KEY_TYPE_CMD | KEY_CMD_SAY_ABOVE, "SAY_ABOVE"),
    (KEY_TYPE_CMD | KEY_CMD_SAY_BELOW, "SAY_BELOW"),
    (KEY_TYPE_CMD | KEY_CMD_SAY_SLOWER, "SAY_SLOWER"),
    (KEY_TYPE_CMD | KEY_CMD_SAY_FASTER, "SAY_FASTER"),
    (KEY_TYPE_CMD | KEY_CMD_SAY_SOFTER, "SAY_SOFTER"),
    (KEY_TYPE_CMD | KEY_CMD_SAY_LOUDER, "SAY_LOUDER"),
    (KEY_TYPE_CMD | KEY_CMD_SWITCHVT_PREV, "SWITCHVT_PREV"),
    (KEY_TYPE_CMD | KEY_CMD_SWITCHVT_NEXT, "SWITCHVT_NEXT"),
    (KEY_TYPE_CMD | KEY_CMD_CSRJMP_VERT, "CSRJMP_VERT"),
    (KEY_TYPE_CMD | KEY_CMD_PASTE, "PASTE"),
    (KEY_TYPE_CMD | KEY_CMD_RESTARTBRL, "RESTARTBRL"),
    (KEY_TYPE_CMD | KEY_CMD_RESTARTSPEECH, "RESTARTSPEECH"),
    (KEY_TYPE_CMD | KEY_CMD_OFFLINE, "OFFLINE"),
    (KEY_TYPE_CMD | KEY_CMD_SHIFT, "SHIFT"),
    (KEY_TYPE_CMD | KEY_CMD_UPPER, "UPPER"),
    (KEY_TYPE_CMD | KEY_CMD_CONTROL, "CONTROL"),
    (KEY_TYPE_CMD | KEY_CMD_META, "META"),
    (KEY_TYPE_CMD | KEY_CMD_TIME, "TIME"),
    (KEY_TYPE_CMD | KEY_CMD_MENU_PREV_LEVEL, "MENU_PREV_LEVEL"),
    (KEY_TYPE_CMD | KEY_CMD_ASPK_SEL_LINE, "ASPK_SEL_LINE"),
    (KEY_TYPE_CMD | KEY_CMD_ASPK_SEL_CHAR, "ASPK_SEL_CHAR"),
    (KEY_TYPE_CMD | KEY_CMD_ASPK_INS_CHARS, "ASPK_INS_CHARS"),
    (KEY_TYPE_CMD | KEY_CMD_ASPK_DEL_CHARS, "ASPK_DEL_CHARS"),
    (KEY_TYPE_CMD | KEY_CMD_ASPK_REP_CHARS, "ASPK_REP_CHARS"),
    (KEY_TYPE_CMD | KEY_CMD_ASPK_CMP_WORDS, "ASPK_CMP_WORDS"),
    (KEY_TYPE_CMD | KEY_CMD_SPEAK_CURR_CHAR, "SPEAK_CURR_CHAR"),
    (KEY_TYPE_CMD | KEY_CMD_SPEAK_PREV_CHAR, "SPEAK_PREV_CHAR"),
    (KEY_TYPE_CMD | KEY_CMD_SPEAK_NEXT_CHAR, "SPEAK_NEXT_CHAR"),
    (KEY_TYPE_CMD | KEY_CMD_SPEAK_CURR_WORD, "SPEAK_CURR_WORD"),
    (KEY_TYPE_CMD | KEY_CMD_SPEAK_PREV_WORD, "SPEAK_PREV_WORD"),
    (KEY_TYPE_CMD | KEY_CMD_SPEAK_NEXT_WORD, "SPEAK_NEXT_WORD"),
    (KEY_TYPE_CMD | KEY_CMD_SPEAK_CURR_LINE, "SPEAK_CURR_LINE"),
    (KEY_TYPE_CMD | KEY_CMD_SPEAK_PREV_LINE, "SPEAK_PREV_LINE"),
    (KEY_TYPE_CMD | KEY_CMD_SPEAK_NEXT_LINE, "SPEAK_NEXT_LINE"),
    (KEY_TYPE_CMD | KEY_CMD_SPEAK_FRST_CHAR, "SPEAK_FRST_CHAR"),
    (KEY_TYPE_CMD | KEY_CMD_SPEAK_LAST_CHAR, "SPEAK_LAST_CHAR"),
    (KEY_TYPE_CMD | KEY_CMD_SPEAK_FRST_LINE, "SPEAK_FRST_LINE"),
    (KEY_TYPE_CMD | KEY_CMD_SPEAK_LAST_LINE, "SPEAK_LAST_LINE"),
    (KEY_TYPE_CMD | KEY_CMD_DESC_CURR_CHAR, "DESC_CURR_CHAR"),
    (KEY_TYPE_CMD | KEY_CMD_SPELL_CURR_WORD, "SPELL_CURR_WORD"),
    (KEY_TYPE_CMD | KEY_CMD_ROUTE_CURR_LOCN, "ROUTE_CURR_LOCN"),
    (KEY_TYPE_CMD | KEY_CMD_SPEAK_CURR_LOCN, "SPEAK_CURR_LOCN"),
    (KEY_TYPE_CMD | KEY_CMD_SHOW_CURR_LOCN, "SHOW_CURR_LOCN"),
    (KEY_TYPE_CMD | KEY_CMD_CLIP_SAVE, "CLIP_SAVE"),
    (KEY_TYPE_CMD | KEY_CMD_CLIP_RESTORE, "CLIP_RESTORE"),
    (KEY_TYPE_CMD | KEY_CMD_BRLUCDOTS, "BRLUCDOTS"),
    (KEY_TYPE_CMD | KEY_CMD_BRLKBD, "BRLKBD"),
    (KEY_TYPE_CMD | KEY_CMD_UNSTICK, "UNSTICK"),
    (KEY_TYPE_CMD | KEY_CMD_ALTGR, "ALTGR"),
    (KEY_TYPE_CMD | KEY_CMD_GUI, "GUI"),
    (KEY_TYPE_CMD | KEY_CMD_BRL_STOP, "BRL_STOP"),
    (KEY_TYPE_CMD | KEY_CMD_BRL_START, "BRL_START"),
    (KEY_TYPE_CMD | KEY_CMD_SPK_STOP, "SPK_STOP"),
    (KEY_TYPE_CMD | KEY_CMD_SPK_START, "SPK_START"),
    (KEY_TYPE_CMD | KEY_CMD_SCR_STOP, "SCR_STOP"),
    (KEY_TYPE_CMD | KEY_CMD_SCR_START, "SCR_START"),
    (KEY_TYPE_CMD | KEY_CMD_SELECTVT_PREV, "SELECTVT_PREV"),
    (KEY_TYPE_CMD | KEY_CMD_SELECTVT_NEXT, "SELECTVT_NEXT"),
    (KEY_TYPE_CMD | KEY_CMD_PRNBWIN, "PRNBWIN"),
    (KEY_TYPE_CMD | KEY_CMD_NXNBWIN, "NXNBWIN"),
    (KEY_TYPE_CMD | KEY_CMD_TOUCH_NAV, "TOUCH_NAV"),
    (KEY_TYPE_CMD | KEY_CMD_SPEAK_INDENT, "SPEAK_INDENT"),
    (KEY_TYPE_CMD | KEY_CMD_ASPK_INDENT, "ASPK_INDENT"),
    (KEY_TYPE_CMD | KEY_CMD_REFRESH, "REFRESH"),
    (KEY_TYPE_CMD | KEY_CMD_INDICATORS, "INDICATORS"),
    (KEY_TYPE_CMD | KEY_CMD_TXTSEL_CLEAR, "TXTSEL_CLEAR"),
    (KEY_TYPE_CMD | KEY_CMD_TXTSEL_ALL, "TXTSEL_ALL"),
    (KEY_TYPE_CMD | KEY_CMD_HOST_COPY, "HOST_COPY"),
    (KEY_TYPE_CMD | KEY_CMD_HOST_CUT, "HOST_CUT"),
    (KEY_TYPE_CMD | KEY_CMD_HOST_PASTE, "HOST_PASTE"),
    (KEY_TYPE_CMD | KEY_CMD_GUI_TITLE, "GUI_TITLE"),
    (KEY_TYPE_CMD | KEY_CMD_GUI_BRL_ACTIONS, "GUI_BRL_ACTIONS"),
    (KEY_TYPE_CMD | KEY_CMD_GUI_HOME, "GUI_HOME"),
    (KEY_TYPE_CMD | KEY_CMD_GUI_BACK, "GUI_BACK"),
    (KEY_TYPE_CMD | KEY_CMD_GUI_DEV_SETTINGS, "GUI_DEV_SETTINGS"),
    (KEY_TYPE_CMD | KEY_CMD_GUI_DEV_OPTIONS, "GUI_DEV_OPTIONS"),
    (KEY_TYPE_CMD | KEY_CMD_GUI_APP_LIST, "GUI_APP_LIST"),
    (KEY_TYPE_CMD | KEY_CMD_GUI_APP_MENU, "GUI_APP_MENU"),
    (KEY_TYPE_CMD | KEY_CMD_GUI_APP_ALERTS, "GUI_APP_ALERTS"),
    (KEY_TYPE_CMD | KEY_CMD_GUI_AREA_ACTV, "GUI_AREA_ACTV"),
    (KEY_TYPE_CMD | KEY_CMD_GUI_AREA_PREV, "GUI_AREA_PREV"),
    (KEY_TYPE_CMD | KEY_CMD_GUI_AREA_NEXT, "GUI_AREA_NEXT"),
    (KEY_TYPE_CMD | KEY_CMD_GUI_ITEM_FRST, "GUI_ITEM_FRST"),
    (KEY_TYPE_CMD | KEY_CMD_GUI_ITEM_PREV, "GUI_ITEM_PREV"),
    (KEY_TYPE_CMD | KEY_CMD_GUI_ITEM_NEXT, "GUI_ITEM_NEXT"),
    (KEY_TYPE_CMD | KEY_CMD_GUI_ITEM_LAST, "GUI_ITEM_LAST"),
    (KEY_TYPE_CMD | KEY_CMD_SAY_LOWER, "SAY_LOWER"),
    (KEY_TYPE_CMD | KEY_CMD_SAY_HIGHER, "SAY_HIGHER"),
    (KEY_TYPE_CMD | KEY_CMD_SAY_ALL, "SAY_ALL"),
    (KEY_TYPE_CMD | KEY_CMD_CONTRACTED, "CONTRACTED"),
    (KEY_TYPE_CMD | KEY_CMD_COMPBRL6, "COMPBRL6"),
    (KEY_TYPE_CMD | KEY_CMD_PREFRESET, "PREFRESET"),
    (KEY_TYPE_CMD | KEY_CMD_ASPK_EMP_LINE, "ASPK_EMP_LINE"),
    (KEY_TYPE_CMD | KEY_CMD_SPK_PUNCT_LEVEL, "SPK_PUNCT_LEVEL"),
    (KEY_TYPE_CMD | KEY_CMD_ROUTE, "ROUTE"),
    (KEY_TYPE_CMD | KEY_CMD_CLIP_NEW, "CLIP_NEW"),
    (KEY_TYPE_CMD | KEY_CMD_CLIP_ADD, "CLIP_ADD"),
    (KEY_TYPE_CMD | KEY_CMD_COPY_RECT, "COPY_RECT"),
    (KEY_TYPE_CMD | KEY_CMD_COPY_LINE, "COPY_LINE"),
    (KEY_TYPE_CMD | KEY_CMD_SWITCHVT, "SWITCHVT"),
    (KEY_TYPE_CMD | KEY_CMD_PRINDENT, "PRINDENT"),
    (KEY_TYPE_CMD | KEY_CMD_NXINDENT, "NXINDENT"),
    (KEY_TYPE_CMD | KEY_CMD_DESCCHAR, "DESCCHAR"),
    (KEY_TYPE_CMD | KEY_CMD_SETLEFT, "SETLEFT"),
    (KEY_TYPE_CMD | KEY_CMD_SETMARK, "SETMARK"),
    (KEY_TYPE_CMD | KEY_CMD_GOTOMARK, "GOTOMARK"),
    (KEY_TYPE_CMD | KEY_CMD_GOTOLINE, "GOTOLINE"),
    (KEY_TYPE_CMD | KEY_CMD_PRDIFCHAR, "PRDIFCHAR"),
    (KEY_TYPE_CMD | KEY_CMD_NXDIFCHAR, "NXDIFCHAR"),
    (KEY_TYPE_CMD | KEY_CMD_CLIP_COPY, "CLIP_COPY"),
    (KEY_TYPE_CMD | KEY_CMD_CLIP_APPEND, "CLIP_APPEND"),
    (KEY_TYPE_CMD | KEY_CMD_PASTE_HISTORY, "PASTE_HISTORY"),
    (KEY_TYPE_CMD | KEY_CMD_SET_TEXT_TABLE, "SET_TEXT_TABLE"),
    (KEY_TYPE_CMD | KEY_CMD_SET_ATTRIBUTES_TABLE, "SET_ATTRIBUTES_TABLE"),
    (KEY_TYPE_CMD | KEY_CMD_SET_CONTRACTION_TABLE, "SET_CONTRACTION_TABLE"),
    (KEY_TYPE_CMD | KEY_CMD_SET_KEYBOARD_TABLE, "SET_KEYBOARD_TABLE"),
    (KEY_TYPE_CMD | KEY_CMD_SET_LANGUAGE_PROFILE, "SET_LANGUAGE_PROFILE"),
    (KEY_TYPE_CMD | KEY_CMD_ROUTE_LINE, "ROUTE_LINE"),
    (KEY_TYPE_CMD | KEY_CMD_REFRESH_LINE, "REFRESH_LINE"),
    (KEY_TYPE_CMD | KEY_CMD_TXTSEL_START, "TXTSEL_START"),
    (KEY_TYPE_CMD | KEY_CMD_TXTSEL_SET, "TXTSEL_SET"),
    (KEY_TYPE_CMD | KEY_CMD_ROUTE_SPEECH, "ROUTE_SPEECH"),
    (KEY_TYPE_CMD | KEY_CMD_SELECTVT, "SELECTVT"),
    (KEY_TYPE_CMD | KEY_CMD_ALERT, "ALERT"),
    (KEY_TYPE_CMD | KEY_CMD_PASSDOTS, "PASSDOTS"),
    (KEY_TYPE_CMD | KEY_CMD_PASSAT, "PASSAT"),
    (KEY_TYPE_CMD | KEY_CMD_PASSXT, "PASSXT"),
    (KEY_TYPE_CMD | KEY_CMD_PASSPS2, "PASSPS2"),
    (KEY_TYPE_CMD | KEY_CMD_CONTEXT, "CONTEXT"),
    (KEY_TYPE_CMD | KEY_CMD_TOUCH_AT, "TOUCH_AT"),
    (KEY_TYPE_CMD | KEY_CMD_MACRO, "MACRO"),
    (KEY_TYPE_CMD | KEY_CMD_HOSTCMD, "HOSTCMD"),
    (KEY_TYPE_SYM | KEY_SYM_LINEFEED, "LINEFEED"),
    (KEY_TYPE_SYM | KEY_SYM_TAB, "TAB"),
    (KEY_TYPE_SYM | KEY_SYM_BACKSPACE, "BACKSPACE"),
    (KEY_TYPE_SYM | KEY_SYM_ESCAPE, "ESCAPE"),
    (KEY_TYPE_SYM | KEY_SYM_LEFT, "LEFT"),
    (KEY_TYPE_SYM | KEY_SYM_RIGHT, "RIGHT"),
    (KEY_TYPE_SYM | KEY_SYM_UP, "UP"),
    (KEY_TYPE_SYM | KEY_SYM_DOWN, "DOWN"),
    (KEY_TYPE_SYM | KEY_SYM_PAGE_UP, "PAGE_UP"),
    (KEY_TYPE_SYM | KEY_SYM_PAGE_DOWN, "PAGE_DOWN"),
    (KEY_TYPE_SYM | KEY_SYM_HOME, "HOME"),
    (KEY_TYPE_SYM | KEY_SYM_END, "END"),
    (KEY_TYPE_SYM | KEY_SYM_INSERT, "INSERT"),
    (KEY_TYPE_SYM | KEY_SYM_DELETE, "DELETE"),
    (KEY_TYPE_SYM | KEY_SYM_FUNCTION, "F1"),
    (KEY_TYPE_SYM | (KEY_SYM_FUNCTION + 1), "F2"),
    (KEY_TYPE_SYM | (KEY_SYM_FUNCTION + 2), "F3"),
    (KEY_TYPE_SYM | (KEY_SYM_FUNCTION + 3), "F4"),
    (KEY_TYPE_SYM | (KEY_SYM_FUNCTION + 4), "F5"),
    (KEY_TYPE_SYM | (KEY_SYM_FUNCTION + 5), "F6"),
    (KEY_TYPE_SYM | (KEY_SYM_FUNCTION + 6), "F7"),
    (KEY_TYPE_SYM | (KEY_SYM_FUNCTION + 7), "F8"),
    (KEY_TYPE_SYM | (KEY_SYM_FUNCTION + 8), "F9"),
    (KEY_TYPE_SYM | (KEY_SYM_FUNCTION + 9), "F10"),
    (KEY_TYPE_SYM | (KEY_SYM_FUNCTION + 10), "F11"),
    (KEY_TYPE_SYM | (KEY_SYM_FUNCTION + 11), "F12"),
    (KEY_TYPE_SYM | (KEY_SYM_FUNCTION + 12), "F13"),
    (KEY_TYPE_SYM | (KEY_SYM_FUNCTION + 13), "F14"),
    (KEY_TYPE_SYM | (KEY_SYM_FUNCTION + 14), "F15"),
    (KEY_TYPE_SYM | (KEY_SYM_FUNCTION + 15), "F16"),
    (KEY_TYPE_SYM | (KEY_SYM_FUNCTION + 16), "F17"),
    (KEY_TYPE_SYM | (KEY_SYM_FUNCTION + 17), "F18"),
    (KEY_TYPE_SYM | (KEY_SYM_FUNCTION + 18), "F19"),
    (KEY_TYPE_SYM | (KEY_SYM_FUNCTION + 19), "F20"),
    (KEY_TYPE_SYM | (KEY_SYM_FUNCTION + 20), "F21"),
    (KEY_TYPE_SYM | (KEY_SYM_FUNCTION + 21), "F22"),
    (KEY_TYPE_SYM | (KEY_SYM_FUNCTION + 22), "F23"),
    (KEY_TYPE_SYM | (KEY_SYM_FUNCTION + 23), "F24"),
    (KEY_TYPE_SYM | (KEY_SYM_FUNCTION + 24), "F25"),
    (KEY_TYPE_SYM | (KEY_SYM_FUNCTION + 25), "F26"),
    (KEY_TYPE_SYM | (KEY_SYM_FUNCTION + 26), "F27"),
    (KEY_TYPE_SYM | (KEY_SYM_FUNCTION + 27), "F28"),
    (KEY_TYPE_SYM | (KEY_SYM_FUNCTION + 28), "F29"),
    (KEY_TYPE_SYM | (KEY_SYM_FUNCTION + 29), "F30"),
    (KEY_TYPE_SYM | (KEY_SYM_FUNCTION + 30), "F31"),
    (KEY_TYPE_SYM | (KEY_SYM_FUNCTION + 31), "F32"),
    (KEY_TYPE_SYM | (KEY_SYM_FUNCTION + 32), "F33"),
    (KEY_TYPE_SYM | (KEY_SYM_FUNCTION + 33), "F34"),
    (KEY_TYPE_SYM | (KEY_SYM_FUNCTION + 34), "F35"),
];

/// Key type of a key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    /// Abstract braille command (`LNUP`, `ROUTE`, ...).
    Command,
    /// X keysym, or a Unicode code point when [`KEY_SYM_UNICODE`] is set.
    Symbol,
    /// Type bits that are neither [`KEY_TYPE_CMD`] nor [`KEY_TYPE_SYM`].
    Unknown,
}

/// A key code split into its bit fields.
///
/// Reassembling `kind | command | argument | (flags << 32)` yields the
/// original code for every 64-bit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandedKey {
    /// Raw type bits ([`KEY_TYPE_MASK`] portion).
    pub kind: u64,
    /// Command part of the code, argument bits cleared.
    pub command: u64,
    /// Argument part of the code.
    pub argument: u64,
    /// Flag bits, shifted down to bit 0.
    pub flags: u32,
}

impl ExpandedKey {
    /// Key type corresponding to the raw type bits.
    pub fn key_type(&self) -> KeyType {
        match self.kind {
            KEY_TYPE_CMD => KeyType::Command,
            KEY_TYPE_SYM => KeyType::Symbol,
            _ => KeyType::Unknown,
        }
    }

    /// Reassemble the original 64-bit key code.
    pub fn reassemble(&self) -> u64 {
        self.kind | self.command | self.argument | (u64::from(self.flags) << KEY_FLAGS_SHIFT)
    }
}

/// Width in bits of the argument part for a given key code.
///
/// Braille commands use 16 bits, Unicode keysyms 24, other keysyms 8.
/// Unrecognized type bits decode with width 0 (the whole code is treated
/// as the command).
pub fn argument_width(code: u64) -> u32 {
    match code & KEY_TYPE_MASK {
        KEY_TYPE_CMD => 16,
        KEY_TYPE_SYM if code & KEY_SYM_UNICODE != 0 => 24,
        KEY_TYPE_SYM => 8,
        _ => 0,
    }
}

/// Split a key code into type, command, argument, and flag fields.
pub fn expand(code: u64) -> ExpandedKey {
    let argument_mask = (1u64 << argument_width(code)) - 1;
    let value = code & KEY_CODE_MASK;

    ExpandedKey {
        kind: code & KEY_TYPE_MASK,
        command: value & !argument_mask,
        argument: value & argument_mask,
        flags: (code >> KEY_FLAGS_SHIFT) as u32,
    }
}

/// A key code resolved into a symbolic command name and flag names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDescription {
    /// The original key code.
    pub code: u64,
    /// Key type.
    pub key_type: KeyType,
    /// Symbolic command name, `"UNICODE"` for unlisted Unicode keysyms,
    /// `"UNKNOWN"` when nothing matches.
    pub command: &'static str,
    /// Residual argument: 0 for argument-free commands, the command value
    /// for argument-carrying ones, the code point for `"UNICODE"`.
    pub argument: u64,
    /// Names of the flag bits that are set, decoded for this command.
    pub flags: Vec<&'static str>,
    /// The underlying bit-field split.
    pub expanded: ExpandedKey,
}

fn name_of(code: u64) -> Option<&'static str> {
    KEY_NAMES.iter().find(|(key, _)| *key == code).map(|(_, name)| *name)
}

/// Resolve a key code into its symbolic description.
///
/// The name lookup first tries `type | command | argument` so that
/// argument-free commands (`LNUP`, `TAB`, `F5`, ...) match whole, then
/// `type | command` for commands that carry an argument (`ROUTE`,
/// `PASSDOTS`, ...). Unlisted Unicode keysyms become `"UNICODE"` with the
/// code point as argument.
pub fn describe(code: u64) -> KeyDescription {
    let expanded = expand(code);
    let without_argument = expanded.kind | expanded.command;
    let with_argument = without_argument | expanded.argument;

    let mut argument = expanded.argument;
    let command = if let Some(name) = name_of(with_argument) {
        argument = 0;
        name
    } else if let Some(name) = name_of(without_argument) {
        name
    } else if expanded.kind == KEY_TYPE_SYM && code & KEY_SYM_UNICODE != 0 {
        argument = code & (KEY_SYM_UNICODE - 1);
        "UNICODE"
    } else {
        argument = 0;
        "UNKNOWN"
    };

    KeyDescription {
        code,
        key_type: expanded.key_type(),
        command,
        argument,
        flags: flag_names(code, &expanded),
        expanded,
    }
}

/// Flag-bit names, decoded in the context of the command they accompany.
///
/// The keyboard-emulation bits share values with the toggle bits, so
/// `KBD_*` names are reported only for `PASSXT`/`PASSAT`/`PASSPS2`,
/// `TOGGLE_*`/`MOTION_*` only for the remaining commands, and `PASSDOTS`
/// carries no command-specific flags at all.
fn flag_names(code: u64, expanded: &ExpandedKey) -> Vec<&'static str> {
    const MODIFIERS: [(u64, &str); 6] = [
        (KEY_FLG_SHIFT, "SHIFT"),
        (KEY_FLG_UPPER, "UPPER"),
        (KEY_FLG_CONTROL, "CONTROL"),
        (KEY_FLG_META, "META"),
        (KEY_FLG_ALTGR, "ALTGR"),
        (KEY_FLG_GUI, "GUI"),
    ];
    const KBD: [(u64, &str); 3] = [
        (KEY_FLG_KBD_RELEASE, "KBD_RELEASE"),
        (KEY_FLG_KBD_EMUL0, "KBD_EMUL0"),
        (KEY_FLG_KBD_EMUL1, "KBD_EMUL1"),
    ];
    const TOGGLES: [(u64, &str); 5] = [
        (KEY_FLG_TOGGLE_ON, "TOGGLE_ON"),
        (KEY_FLG_TOGGLE_OFF, "TOGGLE_OFF"),
        (KEY_FLG_MOTION_ROUTE, "MOTION_ROUTE"),
        (KEY_FLG_MOTION_SCALED, "MOTION_SCALED"),
        (KEY_FLG_MOTION_TOLEFT, "MOTION_TOLEFT"),
    ];

    let mut names = Vec::new();
    let mut collect = |set: &[(u64, &'static str)]| {
        for (flag, name) in set {
            if code & flag != 0 {
                names.push(*name);
            }
        }
    };

    collect(&MODIFIERS);
    if expanded.kind == KEY_TYPE_CMD {
        let block = expanded.command & KEY_CMD_BLK_MASK;
        if block == KEY_CMD_PASSDOTS {
            // dot patterns: nothing beyond the modifiers
        } else if matches!(block, KEY_CMD_PASSXT | KEY_CMD_PASSAT | KEY_CMD_PASSPS2) {
            collect(&KBD);
        } else {
            collect(&TOGGLES);
        }
    }
    names
}
