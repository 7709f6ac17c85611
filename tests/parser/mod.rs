mod tests_java_parser;
