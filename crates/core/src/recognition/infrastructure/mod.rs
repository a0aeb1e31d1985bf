pub mod json_lines_recognizer;
